//! Fixed instructions sent to the vision model.

/// System instruction constraining the answer format.
pub const SYSTEM_PROMPT: &str = "\
Your answer must start with ```yaml and end with ```. \
Output only the YAML document. \
Write any explanation or notes as YAML comments inside the document.";

/// Instruction text of a single model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBundle {
    /// System instruction.
    pub system: String,
    /// Task instruction with the supplement embedded.
    pub task: String,
}

impl PromptBundle {
    /// Builds the instructions for a diagram, embedding `supplement` verbatim.
    pub fn new(supplement: &str) -> Self {
        let task = format!(
            "The attached image is an AWS architecture diagram. \
Write a complete AWS CloudFormation template in YAML that builds the architecture it shows.\n\
- Include every resource the architecture needs, with its configuration.\n\
- Wire dependencies and references between resources correctly.\n\
- Reflect the supplementary notes below strictly.\n\
\n\
[Supplementary notes]\n\
{supplement}"
        );

        Self {
            system: SYSTEM_PROMPT.to_owned(),
            task,
        }
    }
}

//! Macro definitions passed to the preprocessor

use bindscan_core::PermutationTag;

/// A macro definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    pub name: String,
    pub value: String,
}

impl MacroDefinition {
    /// Create a macro defined to the empty string
    pub fn defined(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
        }
    }

    /// Create a macro with a specific value
    pub fn with_value(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Symbols for a shader permutation
    pub fn for_permutation(tag: PermutationTag) -> Vec<Self> {
        tag.defines().iter().map(|name| Self::defined(name)).collect()
    }

    /// Convert to the `NAME=VALUE` operand of pcpp's `-D`
    pub fn to_pcpp_operand(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

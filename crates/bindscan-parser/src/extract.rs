//! Register binding extraction
//!
//! Matches declarations of the form
//!
//! ```text
//! <type tokens> <name> : register(<letter><digits>)
//! ```
//!
//! one physical line at a time. The declaration must start at the first
//! non-whitespace character of the line; anything after the closing
//! parenthesis is ignored.

use bindscan_core::{BindingDeclaration, Register, RegisterClass, RegisterNumber};
use regex::Regex;
use std::iter::Enumerate;
use std::str::Lines;
use std::sync::LazyLock;

static BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<type>[\w<>]+(?:\s+[\w<>]+)*)\s+(?P<name>\w+)\s*:\s*register\(\s*(?P<class>[a-z])(?P<number>[0-9]+)\s*\)",
    )
    .unwrap()
});

/// Parse one line as a binding declaration
pub fn parse_binding_line(line: &str) -> Option<BindingDeclaration> {
    let caps = BINDING.captures(line)?;
    let class = caps["class"].chars().next().map(RegisterClass::new)?;
    let number = RegisterNumber::parse(&caps["number"])?;

    Some(BindingDeclaration {
        type_name: caps["type"].to_string(),
        name: caps["name"].to_string(),
        register: Register::new(class, number),
    })
}

/// Lazily extract `(line index, declaration)` pairs from preprocessed text.
/// Line indices are 0-based.
pub fn extract_bindings(text: &str) -> Bindings<'_> {
    Bindings {
        lines: text.lines().enumerate(),
    }
}

/// Iterator returned by [`extract_bindings`]
pub struct Bindings<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl Iterator for Bindings<'_> {
    type Item = (usize, BindingDeclaration);

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .by_ref()
            .find_map(|(index, line)| parse_binding_line(line).map(|decl| (index, decl)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindscan_core::RegisterKind;

    #[test]
    fn test_templated_texture() {
        let decl = parse_binding_line("  Texture2D<float4> MyTex : register(t3)").unwrap();
        assert_eq!(decl.type_name, "Texture2D<float4>");
        assert_eq!(decl.name, "MyTex");
        assert_eq!(decl.register.class.letter(), 't');
        assert_eq!(decl.register.number.as_str(), "3");
        assert_eq!(decl.register.kind(), RegisterKind::Srv);
    }

    #[test]
    fn test_register_in_expression_rejected() {
        assert!(parse_binding_line("float x = register(t3);").is_none());
    }

    #[test]
    fn test_declaration_after_code_rejected() {
        assert!(parse_binding_line("float a; SamplerState Linear : register(s0);").is_none());
    }

    #[test]
    fn test_multi_token_type() {
        let decl =
            parse_binding_line("globallycoherent RWTexture2D<float4> Output : register(u1);").unwrap();
        assert_eq!(decl.type_name, "globallycoherent RWTexture2D<float4>");
        assert_eq!(decl.name, "Output");
        assert_eq!(decl.register.kind(), RegisterKind::Uav);
    }

    #[test]
    fn test_cbuffer() {
        let decl = parse_binding_line("cbuffer PerFrame : register(b12)").unwrap();
        assert_eq!(decl.type_name, "cbuffer");
        assert_eq!(decl.name, "PerFrame");
        assert_eq!(decl.register.to_string(), "b12");
        assert_eq!(decl.register.kind(), RegisterKind::Cbv);
    }

    #[test]
    fn test_unknown_register_letter() {
        let decl = parse_binding_line("Foo Bar : register(x9)").unwrap();
        assert_eq!(decl.register.to_string(), "x9");
        assert_eq!(decl.register.kind(), RegisterKind::Unknown);
    }

    #[test]
    fn test_leading_zeros_and_large_numbers() {
        let decl = parse_binding_line("SamplerState S : register( s007 )").unwrap();
        assert_eq!(decl.register.number.as_str(), "7");

        let decl = parse_binding_line("Texture2D T : register(t123456789012345678901234567890)").unwrap();
        assert_eq!(decl.register.number.as_str(), "123456789012345678901234567890");
    }

    #[test]
    fn test_uppercase_letter_rejected() {
        assert!(parse_binding_line("Texture2D T : register(T0)").is_none());
    }

    #[test]
    fn test_marker_lines_never_match() {
        assert!(parse_binding_line(r#"#line 12 "Shaders/Common.hlsli""#).is_none());
    }

    #[test]
    fn test_extract_yields_line_indices() {
        let text = "\
Texture2D<float4> A : register(t0);
float4 unrelated;

SamplerState B : register(s1);
";
        let found: Vec<(usize, String)> = extract_bindings(text)
            .map(|(index, decl)| (index, decl.name))
            .collect();
        assert_eq!(found, vec![(0, "A".to_string()), (3, "B".to_string())]);
    }

    #[test]
    fn test_extract_empty_text() {
        assert_eq!(extract_bindings("").count(), 0);
    }
}

//! Extraction tests over realistic pcpp output
//!
//! These exercise remapping and matching together, on text shaped like what
//! pcpp emits for community shader sources.

use super::*;
use crate::runner::observe;
use bindscan_core::{PermutationTag, RegisterKind};
use pretty_assertions::assert_eq;

/// pcpp output for a deferred composite shader with a skipped VR block
const DEFERRED_COMPOSITE: &str = r#"#line 1 "Shaders/DeferredCompositeCS.hlsl"
#include "Common/Color.hlsli"
#include "Common/FrameBuffer.hlsli"

Texture2D<unorm half3> AlbedoTexture : register(t0);
Texture2D<unorm half3> SpecularTexture : register(t1);
Texture2D<unorm half4> NormalRoughnessTexture : register(t2);
#line 14 "Shaders/DeferredCompositeCS.hlsl"
Texture2D<unorm float> DepthTexture : register(t7);

RWTexture2D<half3> MainRW : register(u0);
    RWTexture2D<half4> NormalTAAMaskSpecularMaskRW : register(u1);

SamplerState LinearSampler : register(s0);
"#;

fn declared(text: &str) -> Vec<(usize, String, String)> {
    observe(text, "Shaders/DeferredCompositeCS.hlsl", PermutationTag::Pixel)
        .into_iter()
        .map(|o| (o.location.line, o.declaration.name, o.declaration.register.to_string()))
        .collect()
}

#[test]
fn test_deferred_composite_bindings() {
    let found = declared(DEFERRED_COMPOSITE);
    let expected = vec![
        (4, "AlbedoTexture", "t0"),
        (5, "SpecularTexture", "t1"),
        (6, "NormalRoughnessTexture", "t2"),
        (14, "DepthTexture", "t7"),
        (16, "MainRW", "u0"),
        (17, "NormalTAAMaskSpecularMaskRW", "u1"),
        (19, "LinearSampler", "s0"),
    ];
    let expected: Vec<(usize, String, String)> = expected
        .into_iter()
        .map(|(l, n, r)| (l, n.to_string(), r.to_string()))
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_type_tokens_preserved() {
    let decl = extract_bindings(DEFERRED_COMPOSITE).next().unwrap().1;
    assert_eq!(decl.type_name, "Texture2D<unorm half3>");
    assert_eq!(decl.register.kind(), RegisterKind::Srv);
}

#[test]
fn test_include_marker_scenario() {
    // Marker at index 2, binding two lines later.
    let text = "// header\n\
                // header\n\
                #line 50 \"b.hlsli\"\n\
                static const float Pi = 3.14159;\n\
                StructuredBuffer<Light> Lights : register(t17);\n";
    let found = declared(text);
    assert_eq!(found, vec![(51, "Lights".to_string(), "t17".to_string())]);
}

#[test]
fn test_passthru_macros_do_not_match() {
    let text = r#"#line 1 "Shaders/Common/Random.hlsli"
#define RANDOM_SEED register(b9)
float Seed : SV_Position;
SHARED_DATA_REGISTER(b5)
"#;
    assert!(declared(text).is_empty());
}

#[test]
fn test_remapper_and_extractor_agree_on_crlf() {
    let text = "#line 10 \"a.hlsl\"\r\nTexture2D T : register(t4);\r\n";
    let index = extract_bindings(text).next().unwrap().0;
    assert_eq!(LineRemapper::new(text).original_line(index), 10);
}

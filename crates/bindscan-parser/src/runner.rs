//! Permutation runner
//!
//! Preprocesses one shader file under one permutation and resolves every
//! binding found back to its original source line.

use std::path::Path;
use tracing::{debug, warn};

use crate::extract::extract_bindings;
use crate::preprocessor::{MacroDefinition, Preprocessor};
use crate::remap::LineRemapper;
use bindscan_core::{BindingDeclaration, PermutationTag, SourceLocation};

/// A binding declaration seen under one permutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub location: SourceLocation,
    pub declaration: BindingDeclaration,
    pub permutation: PermutationTag,
}

/// Runs files through a [`Preprocessor`] per permutation
pub struct PermutationRunner<'a> {
    preprocessor: &'a dyn Preprocessor,
}

impl<'a> PermutationRunner<'a> {
    pub fn new(preprocessor: &'a dyn Preprocessor) -> Self {
        Self { preprocessor }
    }

    /// Observations for `path` under `tag`.
    ///
    /// `relative` is the root-relative display path recorded in each
    /// location. Preprocessor failures yield no observations.
    pub fn run(&self, path: &Path, relative: &str, tag: PermutationTag) -> Vec<Observation> {
        let defines = MacroDefinition::for_permutation(tag);
        let text = match self.preprocessor.preprocess(path, &defines) {
            Ok(text) => text,
            Err(e) => {
                warn!("{} failed on {} [{}]: {}", self.preprocessor.name(), relative, tag, e);
                return Vec::new();
            }
        };

        let observations = observe(&text, relative, tag);
        debug!("{} [{}]: {} bindings", relative, tag, observations.len());
        observations
    }

    /// Observations for `path` under every permutation, in [`PermutationTag::ALL`] order
    pub fn run_all(&self, path: &Path, relative: &str) -> Vec<Observation> {
        PermutationTag::ALL
            .iter()
            .flat_map(|tag| self.run(path, relative, *tag))
            .collect()
    }
}

/// Extract and remap bindings from already preprocessed text
pub fn observe(text: &str, relative: &str, tag: PermutationTag) -> Vec<Observation> {
    if text.is_empty() {
        return Vec::new();
    }

    let remapper = LineRemapper::new(text);
    extract_bindings(text)
        .map(|(index, declaration)| Observation {
            location: SourceLocation::new(relative, remapper.original_line(index)),
            declaration,
            permutation: tag,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessor::PreprocessError;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Returns canned output keyed by the joined define names
    struct CannedPreprocessor {
        outputs: HashMap<String, String>,
    }

    impl Preprocessor for CannedPreprocessor {
        fn preprocess(&self, _path: &Path, defines: &[MacroDefinition]) -> Result<String, PreprocessError> {
            let key: Vec<&str> = defines.iter().map(|d| d.name.as_str()).collect();
            self.outputs
                .get(&key.join(","))
                .cloned()
                .ok_or_else(|| PreprocessError::Failed {
                    status: Some(1),
                    stderr: "no output".to_string(),
                })
        }

        fn name(&self) -> &str {
            "canned"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_remaps_each_binding() {
        let text = "#line 1 \"Shaders/Sky.hlsl\"\n\
                    Texture2D<float4> SkyTex : register(t0);\n\
                    #line 30 \"Shaders/Sky.hlsl\"\n\
                    SamplerState SkySampler : register(s0);\n";
        let observations = observe(text, "Shaders/Sky.hlsl", PermutationTag::Pixel);

        let lines: Vec<(usize, &str)> = observations
            .iter()
            .map(|o| (o.location.line, o.declaration.name.as_str()))
            .collect();
        assert_eq!(lines, vec![(1, "SkyTex"), (30, "SkySampler")]);
        assert!(observations.iter().all(|o| o.permutation == PermutationTag::Pixel));
    }

    #[test]
    fn test_failure_and_empty_output_yield_nothing() {
        let mut outputs = HashMap::new();
        outputs.insert("PSHADER".to_string(), String::new());
        outputs.insert(
            "VSHADER".to_string(),
            "cbuffer PerGeometry : register(b2)\n".to_string(),
        );
        let preprocessor = CannedPreprocessor { outputs };
        let runner = PermutationRunner::new(&preprocessor);
        let path = PathBuf::from("Shaders/Water.hlsl");

        assert!(runner.run(&path, "Shaders/Water.hlsl", PermutationTag::Pixel).is_empty());
        assert!(runner.run(&path, "Shaders/Water.hlsl", PermutationTag::PixelVr).is_empty());

        let all = runner.run_all(&path, "Shaders/Water.hlsl");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].permutation, PermutationTag::Vertex);
        assert_eq!(all[0].location, SourceLocation::new("Shaders/Water.hlsl", 0));
    }
}

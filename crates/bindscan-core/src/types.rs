//! Core type definitions

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Register class letter (`t`, `u`, `s`, `b`, or any other lowercase letter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegisterClass(char);

impl RegisterClass {
    /// Create a register class from its letter
    pub fn new(letter: char) -> Self {
        Self(letter.to_ascii_lowercase())
    }

    /// The class letter
    pub fn letter(&self) -> char {
        self.0
    }

    /// Resolve the D3D register kind for this class
    pub fn kind(&self) -> RegisterKind {
        RegisterKind::from_letter(self.0)
    }
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Register slot number of arbitrary magnitude.
///
/// Stored as a decimal digit string without leading zeros; ordering is
/// numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterNumber(String);

impl RegisterNumber {
    /// Parse a run of ASCII decimal digits. Returns `None` for empty input or
    /// any non-digit character.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let normalized = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self(normalized.to_string()))
    }

    /// Normalized digit string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for RegisterNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        // No leading zeros, so a longer string is a larger number.
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for RegisterNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RegisterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A register binding slot, e.g. `t3`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Register {
    pub class: RegisterClass,
    pub number: RegisterNumber,
}

impl Register {
    pub fn new(class: RegisterClass, number: RegisterNumber) -> Self {
        Self { class, number }
    }

    pub fn kind(&self) -> RegisterKind {
        self.class.kind()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.number)
    }
}

/// Kind of resource view bound to a register class
///
/// See <https://learn.microsoft.com/en-us/windows/win32/direct3d12/resource-binding-in-hlsl>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterKind {
    /// Shader resource view (`t`)
    Srv,
    /// Unordered access view (`u`)
    Uav,
    /// Sampler (`s`)
    Sampler,
    /// Constant buffer view (`b`)
    Cbv,
    Unknown,
}

impl RegisterKind {
    /// Look up the kind for a register letter
    pub fn from_letter(letter: char) -> Self {
        match letter.to_ascii_lowercase() {
            't' => RegisterKind::Srv,
            'u' => RegisterKind::Uav,
            's' => RegisterKind::Sampler,
            'b' => RegisterKind::Cbv,
            _ => RegisterKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterKind::Srv => "SRV",
            RegisterKind::Uav => "UAV",
            RegisterKind::Sampler => "Sampler",
            RegisterKind::Cbv => "CBV",
            RegisterKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource binding declaration parsed from one line of shader source,
/// e.g. `Texture2D<float4> Albedo : register(t0)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingDeclaration {
    /// Declared type tokens, whitespace preserved between tokens
    pub type_name: String,
    /// Declared variable name
    pub name: String,
    /// Bound register
    pub register: Register,
}

/// Shader compilation permutation (stage x stereo mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermutationTag {
    Pixel,
    PixelVr,
    Vertex,
    VertexVr,
}

impl PermutationTag {
    /// All permutations in scan order
    pub const ALL: [PermutationTag; 4] = [
        PermutationTag::Pixel,
        PermutationTag::PixelVr,
        PermutationTag::Vertex,
        PermutationTag::VertexVr,
    ];

    /// Preprocessor symbols defined (with empty values) for this permutation
    pub fn defines(&self) -> &'static [&'static str] {
        match self {
            PermutationTag::Pixel => &["PSHADER"],
            PermutationTag::PixelVr => &["PSHADER", "VR"],
            PermutationTag::Vertex => &["VSHADER"],
            PermutationTag::VertexVr => &["VSHADER", "VR"],
        }
    }

    /// Report column label
    pub fn label(&self) -> &'static str {
        match self {
            PermutationTag::Pixel => "PSHADER",
            PermutationTag::PixelVr => "PSHADER VR",
            PermutationTag::Vertex => "VSHADER",
            PermutationTag::VertexVr => "VSHADER VR",
        }
    }
}

impl fmt::Display for PermutationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One flag per [`PermutationTag`]: whether a declaration was observed
/// under that permutation. Flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationFlags {
    pub pshader: bool,
    pub pshader_vr: bool,
    pub vshader: bool,
    pub vshader_vr: bool,
}

impl PermutationFlags {
    /// Flags with only `tag` set
    pub fn only(tag: PermutationTag) -> Self {
        let mut flags = Self::default();
        flags.set(tag);
        flags
    }

    pub fn set(&mut self, tag: PermutationTag) {
        *self.slot(tag) = true;
    }

    pub fn get(&self, tag: PermutationTag) -> bool {
        match tag {
            PermutationTag::Pixel => self.pshader,
            PermutationTag::PixelVr => self.pshader_vr,
            PermutationTag::Vertex => self.vshader,
            PermutationTag::VertexVr => self.vshader_vr,
        }
    }

    /// Set every flag that is set in `other`
    pub fn union(&mut self, other: PermutationFlags) {
        for tag in PermutationTag::ALL {
            if other.get(tag) {
                self.set(tag);
            }
        }
    }

    /// Whether all four permutations were observed
    pub fn all(&self) -> bool {
        PermutationTag::ALL.iter().all(|tag| self.get(*tag))
    }

    fn slot(&mut self, tag: PermutationTag) -> &mut bool {
        match tag {
            PermutationTag::Pixel => &mut self.pshader,
            PermutationTag::PixelVr => &mut self.pshader_vr,
            PermutationTag::Vertex => &mut self.vshader,
            PermutationTag::VertexVr => &mut self.vshader_vr,
        }
    }
}

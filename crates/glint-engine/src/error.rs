use std::fmt;

use crate::platform::GlError;
use crate::shader::ShaderStage;

/// Errors surfaced by a [`SurfaceProvider`](crate::SurfaceProvider).
///
/// Context loss is not represented here. It is a recoverable state reported
/// through return values (`render() == Ok(true)`, `compile_program() ==
/// Ok(None)`).
#[derive(Debug)]
pub enum ProviderError {
    /// The platform refused to create a graphics context for the surface.
    /// The provider cannot be used for drawing and should be discarded.
    UnsupportedContext,

    /// `render()` was called while width or height resolved to zero.
    Unprojectable { width: u32, height: u32 },

    /// A shader stage failed to compile.
    ShaderCompile {
        stage: ShaderStage,
        name: String,
        log: String,
    },

    /// The platform could not allocate a program object.
    ProgramCreate { name: String, log: String },

    /// The program failed to link; `log` is the platform program log.
    ProgramLink { name: String, log: String },

    /// Link reported success but left an error code behind.
    ProgramLinkCode { name: String, code: GlError },

    /// A platform error code was pending after `operation`.
    Platform { operation: String, code: GlError },

    /// The backend failed to create or wire a host object.
    Backend {
        operation: &'static str,
        source: anyhow::Error,
    },
}

impl ProviderError {
    pub(crate) fn backend(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Backend { operation, source }
    }

    /// Name of the shader program the error refers to, if any.
    pub fn program_name(&self) -> Option<&str> {
        match self {
            Self::ShaderCompile { name, .. }
            | Self::ProgramCreate { name, .. }
            | Self::ProgramLink { name, .. }
            | Self::ProgramLinkCode { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedContext => write!(f, "GL context is not supported"),
            Self::Unprojectable { width, height } => write!(
                f,
                "refusing to render to an unprojectable surface ({width}x{height}); \
                 check can_project() and parent the container to a sized element"
            ),
            Self::ShaderCompile { stage, name, log } => {
                write!(f, "'{name}' {stage} shader failed to compile:\n{log}")
            }
            Self::ProgramCreate { name, log } => {
                write!(f, "'{name}' shader program could not be created: {log}")
            }
            Self::ProgramLink { name, log } => {
                write!(f, "'{name}' shader program failed to link:\n{log}")
            }
            Self::ProgramLinkCode { name, code } => {
                write!(f, "'{name}' shader program failed to link: {code}")
            }
            Self::Platform { operation, code } => write!(f, "GL error after {operation}: {code}"),
            Self::Backend { operation, source } => write!(f, "failed to {operation}: {source:#}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

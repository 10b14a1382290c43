use crate::error::{ProviderError, Result};
use crate::platform::GraphicsContext;

use super::ShaderStage;

/// Builds a program from vertex + fragment source on `ctx`.
///
/// No caching happens here. When `error_checks` is false, pending error codes
/// and link status are not queried (the caller trusts the platform and avoids
/// the round trips).
///
/// Partially created platform objects are not released on failure.
pub fn link_program<C: GraphicsContext>(
    ctx: &C,
    name: &str,
    vertex_source: &str,
    fragment_source: &str,
    error_checks: bool,
) -> Result<C::Program> {
    let program = ctx
        .create_program()
        .map_err(|log| ProviderError::ProgramCreate {
            name: name.to_owned(),
            log,
        })?;
    check(ctx, error_checks, || format!("createProgram (program '{name}')"))?;

    for (stage, source) in [
        (ShaderStage::Vertex, vertex_source),
        (ShaderStage::Fragment, fragment_source),
    ] {
        let shader = ctx
            .compile_shader(stage, source)
            .map_err(|log| ProviderError::ShaderCompile {
                stage,
                name: name.to_owned(),
                log,
            })?;
        check(ctx, error_checks, || format!("compile {stage} shader (program '{name}')"))?;

        ctx.attach_shader(&program, &shader);
        check(ctx, error_checks, || format!("attach {stage} shader (program '{name}')"))?;
    }

    ctx.link_program(&program);
    if error_checks {
        if !ctx.link_status(&program) {
            return Err(ProviderError::ProgramLink {
                name: name.to_owned(),
                log: ctx.program_info_log(&program),
            });
        }
        let code = ctx.take_error();
        if code.is_failure() {
            return Err(ProviderError::ProgramLinkCode {
                name: name.to_owned(),
                code,
            });
        }
    }

    log::debug!("linked shader program '{name}'");
    Ok(program)
}

fn check<C, F>(ctx: &C, error_checks: bool, operation: F) -> Result<()>
where
    C: GraphicsContext,
    F: FnOnce() -> String,
{
    if !error_checks {
        return Ok(());
    }
    let code = ctx.take_error();
    if code.is_failure() {
        return Err(ProviderError::Platform {
            operation: operation(),
            code,
        });
    }
    Ok(())
}

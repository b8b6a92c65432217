//! Shell completion scripts for the fig-generators binary
//!
//! The clap-generated script is extended so that the GENERATOR argument of
//! `complete`, `query` and `trigger` is filled in from the configured
//! generator names.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

const BIN_NAME: &str = "fig-generators";

/// Generate a shell completion script
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
///
/// # Returns
/// * `Result<String>` - Script text or error
pub fn generate_completion(shell_name: &str) -> Result<String> {
    let shell = parse_shell(shell_name)?;
    let base = base_script(shell);

    let script = match shell {
        Shell::Bash => bash_script(&base),
        Shell::Zsh => zsh_script(&base),
        _ => fish_script(&base),
    };
    Ok(script)
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(ConfigError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            shell_name
        ))
        .into()),
    }
}

fn base_script(shell: Shell) -> String {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn bash_script(base: &str) -> String {
    format!(
        r#"{base}

_fig_generators_names() {{
    fig-generators list --names 2>/dev/null
}}

_fig_generators_enhanced() {{
    local cur prev words cword
    _init_completion || return

    # GENERATOR is the first word after these subcommands
    if [[ $cword -ge 2 ]]; then
        case "${{words[cword-1]}}" in
            complete|query|trigger)
                COMPREPLY=($(compgen -W "$(_fig_generators_names)" -- "$cur"))
                return 0
                ;;
        esac
    fi

    _fig-generators "$@"
}}

complete -F _fig_generators_enhanced fig-generators
"#
    )
}

fn zsh_script(base: &str) -> String {
    format!(
        r#"{base}

_fig_generators_names() {{
    local -a names
    names=($(fig-generators list --names 2>/dev/null))
    _describe 'generators' names
}}

_fig_generators_enhanced() {{
    case ${{words[CURRENT-1]}} in
        complete|query|trigger)
            _fig_generators_names
            return 0
            ;;
    esac

    _fig-generators "$@"
}}

compdef _fig_generators_enhanced fig-generators
"#
    )
}

fn fish_script(base: &str) -> String {
    format!(
        r#"{base}

function __fig_generators_names
    fig-generators list --names 2>/dev/null
end

complete -c fig-generators -n "__fish_seen_subcommand_from complete query trigger; and test (count (commandline -opc)) -eq 2" -f -a "(__fig_generators_names)" -d "Configured generator"
"#
    )
}

// build.rs - generates compile-time limits from config/<profile>.toml
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    tokenizer: TokenizerLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct TokenizerLimits {
    max_expression_length: usize,
    max_function_arguments: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

const EXPRESSION_LENGTH_CEILING: usize = 1_000_000;
const PRODUCTION_EXPRESSION_LENGTH_CEILING: usize = 65_536;

fn main() {
    if let Err(message) = run() {
        panic!("arith_tokenizer build configuration: {}", message);
    }
}

fn run() -> Result<(), String> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ARITH_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=ARITH_CONFIG_DIR");

    let profile = env::var("ARITH_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("ARITH_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let config_path = config_file(&config_dir, &profile)?;
    println!("cargo:rerun-if-changed={}", config_path.display());

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("cannot read {}: {}", config_path.display(), e))?;
    let config: CompileTimeConfig = toml::from_str(&content)
        .map_err(|e| format!("invalid TOML in {}: {}", config_path.display(), e))?;

    check_limits(&config, &profile)?;

    let out_dir = env::var("OUT_DIR").map_err(|e| format!("OUT_DIR not set: {}", e))?;
    let output_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&output_path, render_constants(&config, &profile))
        .map_err(|e| format!("cannot write {}: {}", output_path.display(), e))?;

    println!("cargo:rustc-env=ARITH_CONFIG_PROFILE={}", profile);
    println!("cargo:rustc-env=ARITH_CONFIG_SOURCE={}", config_path.display());
    Ok(())
}

/// The config directory lives at the workspace root, next to this crate
fn config_file(config_dir: &str, profile: &str) -> Result<PathBuf, String> {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").map_err(|e| format!("CARGO_MANIFEST_DIR not set: {}", e))?;
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .ok_or_else(|| format!("{} has no parent directory", manifest_dir))?;

    let path = workspace_root
        .join(config_dir)
        .join(format!("{}.toml", profile));
    if !path.exists() {
        return Err(format!(
            "profile '{}' not found, expected {}",
            profile,
            path.display()
        ));
    }

    Ok(path)
}

fn check_limits(config: &CompileTimeConfig, profile: &str) -> Result<(), String> {
    let tokenizer = &config.tokenizer;

    if tokenizer.max_expression_length == 0
        || tokenizer.max_expression_length > EXPRESSION_LENGTH_CEILING
    {
        return Err(format!(
            "max_expression_length must be in 1..={}",
            EXPRESSION_LENGTH_CEILING
        ));
    }
    if profile == "production"
        && tokenizer.max_expression_length > PRODUCTION_EXPRESSION_LENGTH_CEILING
    {
        return Err(format!(
            "production max_expression_length must not exceed {}",
            PRODUCTION_EXPRESSION_LENGTH_CEILING
        ));
    }
    if tokenizer.max_function_arguments == 0 {
        return Err("max_function_arguments must be greater than zero".to_string());
    }
    if config.logging.security_min_log_level > 2 {
        return Err("security_min_log_level must be 0, 1 or 2".to_string());
    }

    Ok(())
}

fn render_constants(config: &CompileTimeConfig, profile: &str) -> String {
    format!(
        r#"// Generated by build.rs from the '{profile}' profile. Do not edit.

pub mod compile_time {{
    pub mod tokenizer {{
        pub const MAX_EXPRESSION_LENGTH: usize = {max_expression_length};
        pub const MAX_FUNCTION_ARGUMENTS: usize = {max_function_arguments};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {log_buffer_size};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {max_log_message_length};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {security_min_log_level};
    }}
}}
"#,
        profile = profile,
        max_expression_length = config.tokenizer.max_expression_length,
        max_function_arguments = config.tokenizer.max_function_arguments,
        log_buffer_size = config.logging.log_buffer_size,
        max_log_message_length = config.logging.max_log_message_length,
        security_min_log_level = config.logging.security_min_log_level,
    )
}

use arith_tokenizer::config::build_info;
use arith_tokenizer::config::runtime::{parse_log_level, RuntimeConfig};
use arith_tokenizer::logging;
use arith_tokenizer::tokens::SourceMap;
use arith_tokenizer::{
    lexical, log_info, to_token_kind, validate_tokens, ExpressionTokenizer, Token, TokenStream,
};
use clap::Parser;
use std::process::ExitCode;

/// Tokenize column arithmetic expressions
#[derive(Parser, Debug)]
#[command(name = "arith-tokenize", version, about)]
struct Cli {
    /// Expressions to tokenize, one stream each
    #[arg(required = true)]
    expressions: Vec<String>,

    /// Print each token stream as JSON
    #[arg(long)]
    json: bool,

    /// Check each expression against the arithmetic grammar
    #[arg(long)]
    validate: bool,

    /// Print the key a new token of this kind would get at the end of the stream
    #[arg(long, value_name = "KIND")]
    next_key: Option<String>,

    /// Source name attached to token locations and log events
    #[arg(long, value_name = "NAME")]
    source: Option<String>,

    /// Minimum log level (error, warning, info, debug)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit log events as JSON lines on stderr
    #[arg(long)]
    structured_logs: bool,
}

impl Cli {
    /// Environment defaults with the command-line overrides applied
    fn runtime_config(&self) -> Result<RuntimeConfig, String> {
        let mut config = RuntimeConfig::default();

        if let Some(level) = &self.log_level {
            config.logging.min_log_level =
                parse_log_level(level).ok_or_else(|| format!("Unknown log level: {}", level))?;
            config.logging.enable_console_logging = true;
        }
        if self.structured_logs {
            config.logging.use_structured_logging = true;
            config.logging.enable_console_logging = true;
        }
        if let Some(source) = &self.source {
            config.tokenizer = config.tokenizer.with_source_name(source.clone());
        }

        Ok(config)
    }

    fn run(&self) -> Result<bool, Box<dyn std::error::Error>> {
        let config = self.runtime_config()?;
        logging::config::init_runtime_preferences(config.logging.clone())?;
        logging::init_global_logging()?;
        lexical::validate_tokenization()?;

        log_info!("Tokenizing expressions",
            "count" => self.expressions.len(),
            "profile" => build_info::profile(),
            "min_level" => config.logging.min_log_level.as_str()
        );

        let next_kind = self.next_key.as_deref().map(to_token_kind).transpose()?;
        let mut tokenizer = ExpressionTokenizer::with_preferences(config.tokenizer);
        let mut all_valid = true;

        for (index, expression) in self.expressions.iter().enumerate() {
            if index > 0 && !self.json {
                println!();
            }

            let stream = tokenizer.tokenize(expression)?;

            if self.json {
                println!("{}", serde_json::to_string_pretty(&stream)?);
            } else {
                print_stream(&stream);
            }

            if let (Some(kind), Some(last)) = (next_kind, stream.tokens().last()) {
                println!("next {}: {}", kind, stream.next_key_of_kind(last, kind, 1)?);
            }

            if self.validate {
                match validate_tokens(stream.tokens()) {
                    Ok(()) => println!("valid"),
                    Err(error) => {
                        all_valid = false;
                        let message = error.to_string();
                        match error.location() {
                            Some(location) => eprintln!(
                                "{}",
                                SourceMap::new(expression.as_str()).format_error(location, &message)
                            ),
                            None => eprintln!("error: {}", message),
                        }
                    }
                }
            }
        }

        Ok(all_valid)
    }
}

fn print_stream(stream: &TokenStream) {
    for token in stream.iter() {
        print_row(
            token.key(),
            token.kind().label(),
            &token.location().to_string(),
            &token.text(),
            "",
        );
        if let Token::Function(function) = token {
            for argument in &function.arguments {
                print_row(
                    argument.key(),
                    argument.kind().label(),
                    &argument.location().to_string(),
                    &argument.text(),
                    "  ",
                );
            }
        }
    }
}

fn print_row(key: &str, kind: &str, location: &str, text: &str, indent: &str) {
    println!("{}{:<16} {:<12} {:<12} {:?}", indent, key, kind, location, text);
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

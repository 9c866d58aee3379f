use clap::Parser;

mod commands;
mod output;

use commands::{rename, GlobalArgs};
use output::response;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "maprename")]
#[command(version = VERSION)]
#[command(about = "Apply a file of `from -> to` symbol renames with fastmod")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    rename: rename::RenameArgs,
}

fn init_logging(global: &GlobalArgs) {
    // the per-mapping `rename` line is info, so it is never filtered out
    let level = if global.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = rename::run(cli.rename);
    let mut exit_code = response::exit_code_for_result(&result);

    if cli.global.json {
        if let Err(err) = response::print_json_result(&result) {
            response::print_error(&err);
            if exit_code == 0 {
                exit_code = response::exit_code_for_error(err.code);
            }
        }
    } else if let Err(err) = &result {
        response::print_error(err);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

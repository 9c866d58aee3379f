use clap::Args;

pub type CmdResult<T> = maprename::Result<T>;

/// Flags shared by every invocation.
#[derive(Args, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Print the result as a JSON envelope on stdout
    #[arg(long)]
    pub json: bool,

    /// Log skipped lines and spawned commands
    #[arg(short, long)]
    pub verbose: bool,
}

pub mod rename;

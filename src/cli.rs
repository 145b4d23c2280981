//! Command line interface of the `describe-subtree` binary.
use std::path::PathBuf;

use clap::Parser;

use crate::options::DescribeOptions;
use crate::utils::MAX_TIME_PRECISION;

/// Produce a recursive deterministic textual description of given input
/// files and/or directories.
///
/// The output is easy to `diff` and is stable across runs over an unchanged
/// tree, which makes it useful for fixed-output tests of programs that
/// produce file system trees. For hardlinks, the first file encountered in
/// walk order is described, all others are emitted as `ref`s to it.
#[derive(Parser, Debug, Clone)]
#[command(name = "describe-subtree", version, about, long_about)]
pub struct Args {
    /// Input files and/or directories
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Emit number prefixes even with a single input PATH
    #[arg(long, default_value_t = false)]
    pub numbers: bool,

    /// Emit paths without escaping them even when they contain special symbols
    #[arg(long, default_value_t = false)]
    pub literal: bool,

    /// Emit file modes
    #[arg(long, default_value_t = false)]
    pub modes: bool,

    /// Emit file mtimes
    #[arg(long, default_value_t = false)]
    pub mtimes: bool,

    /// Do not emit file sizes and hashes
    #[arg(long, default_value_t = false)]
    pub no_sizes: bool,

    /// An alias for `--mtimes --modes`
    #[arg(long, default_value_t = false)]
    pub full: bool,

    /// Emit relative paths when emitting `ref`s
    #[arg(long, visible_alias = "relative-hardlinks", default_value_t = false)]
    pub relative: bool,

    /// Follow all symbolic links, describing their targets in their place
    #[arg(
        short = 'L',
        long = "dereference",
        visible_alias = "follow-symlinks",
        default_value_t = false
    )]
    pub dereference: bool,

    /// Time precision as a negative power of 10; `0` means seconds, `9`
    /// nanoseconds
    #[arg(
        long,
        value_name = "INT",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_TIME_PRECISION))
    )]
    pub time_precision: u32,

    /// Cut hashes to their prefixes of this many characters; default: print
    /// them whole
    #[arg(long, value_name = "INT", value_parser = clap::value_parser!(u64).range(1..))]
    pub hash_length: Option<u64>,
}

impl From<&Args> for DescribeOptions {
    fn from(args: &Args) -> Self {
        Self {
            numbers: args.numbers,
            literal_paths: args.literal,
            emit_mode: args.modes || args.full,
            emit_mtime: args.mtimes || args.full,
            mtime_precision: args.time_precision,
            emit_size: !args.no_sizes,
            hash_length: args.hash_length.map(|n| n as usize),
            relative_refs: args.relative,
            follow_symlinks: args.dereference,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn options(argv: &[&str]) -> DescribeOptions {
        let args = Args::try_parse_from(argv).unwrap();
        DescribeOptions::from(&args)
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        assert_eq!(options(&["describe-subtree", "."]), DescribeOptions::default());
    }

    #[test]
    fn full_is_modes_and_mtimes() {
        let options = options(&["describe-subtree", "--full", "."]);
        assert!(options.emit_mode);
        assert!(options.emit_mtime);
    }

    #[test]
    fn aliases() {
        let a = options(&["describe-subtree", "--relative-hardlinks", "-L", "."]);
        let b = options(&["describe-subtree", "--relative", "--follow-symlinks", "."]);
        let c = options(&["describe-subtree", "--relative", "--dereference", "."]);
        assert!(a.relative_refs && a.follow_symlinks);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn numeric_flags() {
        let options = options(&[
            "describe-subtree",
            "--time-precision",
            "3",
            "--hash-length",
            "8",
            "--no-sizes",
            ".",
        ]);
        assert_eq!(options.mtime_precision, 3);
        assert_eq!(options.hash_length, Some(8));
        assert!(!options.emit_size);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::try_parse_from(["describe-subtree"]).is_err());
        assert!(Args::try_parse_from(["describe-subtree", "--time-precision", "10", "."]).is_err());
        assert!(Args::try_parse_from(["describe-subtree", "--time-precision", "-1", "."]).is_err());
        assert!(Args::try_parse_from(["describe-subtree", "--hash-length", "0", "."]).is_err());
    }

    #[test]
    fn multiple_paths() {
        let args = Args::try_parse_from(["describe-subtree", "x", "y"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("x"), PathBuf::from("y")]);
    }
}

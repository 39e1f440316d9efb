mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use morph_codegen::Target;
use morph_core::Format;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// A document format named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Json,
    Xml,
    Yaml,
    Csv,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Format {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Xml => Format::Xml,
            FormatArg::Yaml => Format::Yaml,
            FormatArg::Csv => Format::Csv,
        }
    }
}

/// A declaration target named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LanguageArg {
    Typescript,
    Python,
    Java,
    Go,
}

impl From<LanguageArg> for Target {
    fn from(arg: LanguageArg) -> Target {
        match arg {
            LanguageArg::Typescript => Target::TypeScript,
            LanguageArg::Python => Target::Python,
            LanguageArg::Java => Target::Java,
            LanguageArg::Go => Target::Go,
        }
    }
}

/// morph multi-format data toolkit.
#[derive(Parser)]
#[command(name = "morph", version, about = "morph multi-format data toolkit")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document between formats
    Convert {
        /// Path to the input document
        input: PathBuf,
        /// Target format
        #[arg(long, value_enum)]
        to: FormatArg,
        /// Source format (default: inferred from the file extension)
        #[arg(long, value_enum)]
        from: Option<FormatArg>,
        /// Root element name for XML output
        #[arg(long, default_value = "root")]
        root: String,
        /// Compact JSON output instead of pretty-printed
        #[arg(long)]
        compact: bool,
        /// Write the result to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Evaluate a path expression against a document
    Query {
        /// Path to the input document
        input: PathBuf,
        /// Path expression, e.g. $.users[*].id
        path: String,
        /// Source format (default: inferred, falling back to JSON)
        #[arg(long, value_enum)]
        from: Option<FormatArg>,
    },

    /// Structurally compare two documents
    Diff {
        /// Path to the original document
        left: PathBuf,
        /// Path to the updated document
        right: PathBuf,
    },

    /// Synthesize example data from a JSON schema description
    Mock {
        /// Path to the schema document (JSON)
        schema: PathBuf,
    },

    /// Emit a typed declaration from a sample document
    Generate {
        /// Target language
        #[arg(value_enum)]
        language: LanguageArg,
        /// Path to the sample document
        input: PathBuf,
        /// Declaration name
        #[arg(long, default_value = "Root")]
        name: String,
        /// Source format (default: inferred, falling back to JSON)
        #[arg(long, value_enum)]
        from: Option<FormatArg>,
    },

    /// Check well-formedness of a document
    Validate {
        /// Path to the input document
        input: PathBuf,
        /// Format to validate as (default: inferred from the file extension)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Check a document against a schema description
    Check {
        /// Path to the data document (JSON)
        data: PathBuf,
        /// Path to the schema document (JSON)
        schema: PathBuf,
    },

    /// Reformat a document (beautify by default)
    Fmt {
        /// Path to the input document
        input: PathBuf,
        /// Strip whitespace instead of indenting
        #[arg(long)]
        minify: bool,
        /// Format to reformat as (default: inferred from the file extension)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            to,
            from,
            root,
            compact,
            out,
        } => {
            commands::cmd_convert(
                &input,
                to.into(),
                from.map(Into::into),
                &root,
                compact,
                out.as_deref(),
            );
        }
        Commands::Query { input, path, from } => {
            commands::cmd_query(&input, &path, from.map(Into::into));
        }
        Commands::Diff { left, right } => {
            commands::cmd_diff(&left, &right, cli.output);
        }
        Commands::Mock { schema } => {
            commands::cmd_mock(&schema);
        }
        Commands::Generate {
            language,
            input,
            name,
            from,
        } => {
            commands::cmd_generate(language.into(), &input, &name, from.map(Into::into));
        }
        Commands::Validate { input, format } => {
            commands::cmd_validate(&input, format.map(Into::into), cli.output);
        }
        Commands::Check { data, schema } => {
            commands::cmd_check(&data, &schema, cli.output);
        }
        Commands::Fmt {
            input,
            minify,
            format,
        } => {
            commands::cmd_fmt(&input, minify, format.map(Into::into));
        }
    }
}

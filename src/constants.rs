// src/constants.rs
//
// Layout and toolchain constants shared by the renderer and the compiler.

/// Cards placed side by side before a row break.
///
/// Three 64 mm cards fill an A4 page width with the 5 mm margins of the template.
pub const DEFAULT_CARDS_PER_ROW: usize = 3;

/// Marker emitted after every full row of cards.
pub const ROW_BREAK: &str = r"\\[5mm]";

/// Glyph shown in the corner of cards flagged with `difficulty: 1`.
pub const DIFFICULTY_MARKER: &str = r"$\star$";

/// Labels used for true/false cards when the config does not override them.
pub const DEFAULT_TRUE_LABEL: &str = "Vero";
pub const DEFAULT_FALSE_LABEL: &str = "Falso";

/// Number of card backs on a printed backs sheet.
pub const BACKS_PER_SHEET: usize = 9;

/// Extension of the compiled artifact.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Typesetting program invoked when the config does not name one.
pub const DEFAULT_COMPILER: &str = "pdflatex";

/// Seconds to wait for the typesetting program before killing it.
pub const DEFAULT_COMPILE_TIMEOUT_SECS: u64 = 30;

/// Trailing lines of tool output attached to a compilation error.
pub const DIAGNOSTIC_TAIL_LINES: usize = 20;

/// Base name of the document inside the compiler's scratch directory.
pub const JOB_NAME: &str = "deck";

// src/ports/latex.rs
use crate::constants::{BACKS_PER_SHEET, DEFAULT_CARDS_PER_ROW, DIFFICULTY_MARKER, ROW_BREAK};
use crate::domain::{Card, QuestionKind};
use crate::util::text::escape_tex;
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, instrument};

const PREAMBLE: &str = r#"\documentclass[parskip]{scrartcl}
\usepackage[margin=5mm]{geometry}
\usepackage{tikz}
\usepackage{graphicx}
\usepackage[shortlabels]{enumitem}
\usepackage{setspace}
"#;

const CARD_GEOMETRY: &str = r#"\pgfmathsetmacro{\cardroundingradius}{2}
\pgfmathsetmacro{\cardwidth}{64}
\pgfmathsetmacro{\cardheight}{89}
\pgfmathsetmacro{\textpadding}{2}
\pgfmathsetmacro{\ruleheight}{0.2}

\newcommand{\questionfontsize}{\large}
\newcommand{\optionfontsize}{\normalsize}
\newcommand{\curiosityfontsize}{\small}
"#;

// #1 question, #2 option list, #3 curiosity, #4 difficulty marker
const CARD_MACRO: &str = r#"\newcommand{\card}[4]{
    \begin{tikzpicture}[x=1mm,y=1mm]
        \draw[rounded corners=\cardroundingradius] (0,0) rectangle (\cardwidth,\cardheight);
        \node[below right,
                minimum width=(\cardwidth-2*\textpadding)*1mm,
                text width=(\cardwidth-3*\textpadding)*1mm,
                align=left
            ]
            at (\textpadding,\cardheight-\textpadding) {
            {\questionfontsize\textbf{\textit{#1}}}\\[-2mm]
            \tikz{\fill (0,0) rectangle (\cardwidth-4*\textpadding,\ruleheight);}\\[0mm]
            \vspace{-3mm}
            {\optionfontsize\textsc{#2}}
        };
        \node[above right,
                minimum width=(\cardwidth-2*\textpadding)*1mm,
                text width=(\cardwidth-3*\textpadding)*1mm,
                align=left,
                execute at begin node=\setlength{\baselineskip}{0.5em}
            ]
            at (\textpadding, \textpadding) {
            \curiosityfontsize\textit{#3}
        };
        \node[above right,
                minimum width=(\cardwidth-2*\textpadding)*1mm,
                text width=(\cardwidth-3*\textpadding)*1mm,
                align=right,
                execute at begin node=\setlength{\baselineskip}{0.5em}
            ]
            at (\textpadding, \textpadding) {
            \curiosityfontsize\textit{#4}
        };
    \end{tikzpicture}
}
"#;

// #1 image path
const BACK_MACRO: &str = r#"\newcommand{\cardback}[1]{
    \begin{tikzpicture}[x=1mm,y=1mm]
        \node[below right,
                minimum width=(\cardwidth)*1mm,
                text width=(\cardwidth-1mm)*1mm,
                align=left
            ]
            at (0,\cardheight - 0.5) {\includegraphics[width=\textwidth]{#1}};
    \end{tikzpicture}
}
"#;

const EPILOGUE: &str = r"\end{document}";

/// Text that has already been through [`escape_tex`].
///
/// Card blocks only hold this type, so a field cannot reach the document
/// unescaped or be escaped twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexText(String);

impl TexText {
    pub fn escape(raw: &str) -> Self {
        Self(escape_tex(raw).into_owned())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Bullet list, used for true/false and enumeration cards.
    Itemize,
    /// `A)`, `B)`, ... labels, used for multiple choice.
    Lettered,
}

impl ListStyle {
    pub fn for_kind(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::MultipleChoice => Self::Lettered,
            QuestionKind::TrueFalse | QuestionKind::Enumeration => Self::Itemize,
        }
    }

    fn begin(&self) -> &'static str {
        match self {
            Self::Itemize => r"\begin{itemize}[leftmargin=*]",
            Self::Lettered => r"\begin{enumerate}[A),leftmargin=*]",
        }
    }

    fn end(&self) -> &'static str {
        match self {
            Self::Itemize => r"\end{itemize}",
            Self::Lettered => r"\end{enumerate}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine {
    pub text: TexText,
    pub correct: bool,
}

/// Layout of one card, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBlock {
    pub question: TexText,
    pub list_style: ListStyle,
    pub options: Vec<OptionLine>,
    pub curiosity: TexText,
    pub hard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_curiosity: bool,
    pub cards_per_row: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_curiosity: false,
            cards_per_row: DEFAULT_CARDS_PER_ROW,
        }
    }
}

#[derive(Debug, Default)]
pub struct LatexPresenter {
    options: RenderOptions,
}

impl LatexPresenter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn layout_card(&self, card: &Card) -> CardBlock {
        let correct = card.correct();
        let options = card
            .options()
            .iter()
            .enumerate()
            .map(|(idx, option)| OptionLine {
                text: TexText::escape(option),
                correct: correct == Some(idx),
            })
            .collect();

        let curiosity = match &card.curiosity {
            Some(text) if self.options.include_curiosity => TexText::escape(text),
            _ => TexText::empty(),
        };

        CardBlock {
            question: TexText::escape(&card.text),
            list_style: ListStyle::for_kind(card.kind()),
            options,
            curiosity,
            hard: card.is_hard(),
        }
    }

    pub fn layout(&self, cards: &[Card]) -> Vec<CardBlock> {
        cards.iter().map(|card| self.layout_card(card)).collect()
    }

    /// Render a complete question deck document.
    #[instrument(level = "debug", skip(self, cards), fields(cards = cards.len()))]
    pub fn render(&self, cards: &[Card]) -> String {
        let blocks = self.layout(cards);
        let document = self.serialize(&blocks);
        debug!(bytes = document.len(), "Rendered deck document");
        document
    }

    pub fn serialize(&self, blocks: &[CardBlock]) -> String {
        let mut out = String::new();
        out.push_str(PREAMBLE);
        out.push_str("\\usepackage[condensed,math]{anttor}\n\\usepackage[T1]{fontenc}\n\n");
        out.push_str("\\begin{document}\n\n");
        out.push_str(CARD_GEOMETRY);
        out.push('\n');
        out.push_str(CARD_MACRO);
        out.push('\n');

        let per_row = self.options.cards_per_row.max(1);
        for (i, block) in blocks.iter().enumerate() {
            write_block(&mut out, block);
            if (i + 1) % per_row == 0 {
                out.push_str(ROW_BREAK);
            }
            out.push('\n');
        }

        out.push_str(EPILOGUE);
        out.push('\n');
        out
    }

    /// Render a sheet of card backs showing the same image.
    #[instrument(level = "debug", skip(self))]
    pub fn render_backs(&self, image_path: &Path) -> String {
        let image = TexText::escape(&image_path.to_string_lossy());
        let per_row = self.options.cards_per_row.max(1);

        let mut out = String::new();
        out.push_str(PREAMBLE);
        out.push_str("\n\\begin{document}\n\n");
        out.push_str(CARD_GEOMETRY);
        out.push('\n');
        out.push_str(BACK_MACRO);
        out.push('\n');

        for i in 1..=BACKS_PER_SHEET {
            let _ = write!(out, "\\cardback{{{}}}", image.as_str());
            if i % per_row == 0 && i != BACKS_PER_SHEET {
                out.push_str(ROW_BREAK);
            }
            out.push('\n');
        }

        out.push_str(EPILOGUE);
        out.push('\n');
        out
    }
}

fn write_block(out: &mut String, block: &CardBlock) {
    let _ = writeln!(out, "\\card");
    let _ = writeln!(out, "    {{{}}}", block.question.as_str());
    let _ = writeln!(out, "    {{{}", block.list_style.begin());
    out.push_str("        \\setlength{\\itemsep}{0pt}\n");
    out.push_str("        \\setlength{\\parskip}{0pt}\n");
    out.push_str("        \\setlength{\\parsep}{0pt}\n");
    for option in &block.options {
        if option.correct {
            let _ = writeln!(out, "        \\bfseries \\item {}\\mdseries", option.text.as_str());
        } else {
            let _ = writeln!(out, "        \\item {}", option.text.as_str());
        }
    }
    let marker = if block.hard { DIFFICULTY_MARKER } else { "" };
    let _ = write!(
        out,
        "    {}}}{{{}}}{{{}}}",
        block.list_style.end(),
        block.curiosity.as_str(),
        marker
    );
}

//! Interactive browsing commands

use pagewindow_core::{
    PagedList,
    context_error::{ContextError, Result},
};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const HELP: &str = "commands: n(ext) | p(rev) | g(oto) N | s(ize) N | first | last | \
                    ins I TEXT | del I [COUNT] | show | help | q(uit)";

/// One line of browse input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Next page
    Next,
    /// Previous page
    Prev,
    /// Jump to a 1-based page, kept as typed
    Goto(String),
    /// Change the page size
    Size(usize),
    /// First page
    First,
    /// Last page
    Last,
    /// Insert a line before `index` (0-based)
    Insert {
        /// Position of the new line
        index: usize,
        /// Line text
        text: String,
    },
    /// Delete `count` lines starting at `index` (0-based)
    Delete {
        /// Position of the first deleted line
        index: usize,
        /// Number of lines
        count: usize,
    },
    /// Print the current page again
    Show,
    /// Print the command list
    Help,
    /// Stop browsing
    Quit,
}

fn parse_index(word: Option<&str>, what: &str) -> Result<usize> {
    let word = word.ok_or_else(|| ContextError::new(format!("missing {what}")))?;
    word.parse()
        .map_err(|e| ContextError::with_context(e, format!("invalid {what} '{word}'")))
}

impl BrowseCommand {
    /// Parse one input line; blank lines are `Ok(None)`
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands or missing/invalid arguments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "n" | "next" => Self::Next,
            "p" | "prev" => Self::Prev,
            "g" | "goto" => Self::Goto(rest.to_string()),
            "s" | "size" => Self::Size(parse_index(Some(rest).filter(|r| !r.is_empty()), "page size")?),
            "first" => Self::First,
            "last" => Self::Last,
            "ins" | "insert" => {
                let (index, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Self::Insert {
                    index: parse_index(Some(index).filter(|i| !i.is_empty()), "index")?,
                    text: text.to_string(),
                }
            }
            "del" | "delete" => {
                let mut words = rest.split_whitespace();
                let index = parse_index(words.next(), "index")?;
                let count = words.next().map_or(Ok(1), |w| parse_index(Some(w), "count"))?;
                Self::Delete { index, count }
            }
            "show" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => {
                return Err(ContextError::new(format!(
                    "unknown command '{other}', try 'help'"
                )));
            }
        };
        Ok(Some(command))
    }
}

/// Print the current page followed by a one-line footer
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render<W: Write>(list: &mut PagedList<String>, out: &mut W) -> Result<()> {
    let first = list.window().visible_range().start;
    let visible = list.visible();
    if visible.is_empty() {
        writeln!(out, "(no items)")?;
    }
    for (offset, line) in visible.iter().enumerate() {
        writeln!(out, "{:>6}  {line}", first + offset + 1)?;
    }

    let snapshot = list.snapshot();
    writeln!(
        out,
        "-- page {}/{} ({} items) --",
        snapshot.page,
        snapshot.page_count,
        snapshot.total_items
    )?;
    Ok(())
}

/// Edits before the shown page move its lines without touching it
fn before_page(list: &PagedList<String>, index: usize) -> bool {
    index < list.window().visible_range().start
}

/// Apply one command; returns `false` when browsing should stop
///
/// # Errors
///
/// Returns an error if the command is rejected by the pager.
pub fn apply(list: &mut PagedList<String>, command: BrowseCommand) -> Result<bool> {
    debug!(?command, "Applying browse command");
    match command {
        BrowseCommand::Next => {
            list.increment_page();
        }
        BrowseCommand::Prev => {
            list.decrement_page();
        }
        BrowseCommand::Goto(input) => list.set_page_from_input(&input)?,
        BrowseCommand::Size(size) => list.set_page_size(size)?,
        BrowseCommand::First => {
            list.first_page();
        }
        BrowseCommand::Last => {
            list.last_page();
        }
        BrowseCommand::Insert { index, text } => {
            let shifts_page = before_page(list, index);
            list.insert(index, text);
            if shifts_page {
                list.refresh();
            }
        }
        BrowseCommand::Delete { index, count } => {
            let shifts_page = before_page(list, index);
            list.splice(index, count, std::iter::empty());
            if shifts_page {
                list.refresh();
            }
        }
        BrowseCommand::Show | BrowseCommand::Help => {}
        BrowseCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Read commands from `input` until it ends or `q`, rendering after each
///
/// Bad commands are reported on `out` and browsing continues.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub fn run<R: BufRead, W: Write>(
    list: &mut PagedList<String>,
    input: R,
    out: &mut W,
) -> Result<()> {
    render(list, out)?;
    for line in input.lines() {
        let line = line?;
        let outcome = BrowseCommand::parse(&line).and_then(|command| match command {
            Some(BrowseCommand::Help) => {
                writeln!(out, "{HELP}")?;
                Ok(true)
            }
            Some(command) => apply(list, command),
            None => Ok(true),
        });

        match outcome {
            Ok(false) => break,
            Ok(true) => render(list, out)?,
            Err(e) => {
                warn!(error = %e, "Browse command failed");
                writeln!(out, "error: {e}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    fn lines(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("line {i}")).collect()
    }

    #[rstest]
    #[case("n", BrowseCommand::Next)]
    #[case("  prev ", BrowseCommand::Prev)]
    #[case("g 3", BrowseCommand::Goto("3".to_string()))]
    #[case("goto abc", BrowseCommand::Goto("abc".to_string()))]
    #[case("s 25", BrowseCommand::Size(25))]
    #[case("first", BrowseCommand::First)]
    #[case("LAST", BrowseCommand::Last)]
    #[case("ins 4 hello world", BrowseCommand::Insert { index: 4, text: "hello world".to_string() })]
    #[case("del 2", BrowseCommand::Delete { index: 2, count: 1 })]
    #[case("del 2 5", BrowseCommand::Delete { index: 2, count: 5 })]
    #[case("q", BrowseCommand::Quit)]
    fn test_parse_commands(#[case] input: &str, #[case] expected: BrowseCommand) {
        assert_eq!(BrowseCommand::parse(input).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("jump")]
    #[case("s")]
    #[case("s many")]
    #[case("ins")]
    #[case("del x")]
    fn test_parse_errors(#[case] input: &str) {
        assert!(BrowseCommand::parse(input).is_err());
    }

    #[test]
    fn test_blank_line_is_no_command() {
        assert_eq!(BrowseCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_render_last_page() {
        let mut list = PagedList::new(lines(12), 5).unwrap();
        list.set_page(3).unwrap();
        let mut out = Vec::new();
        render(&mut list, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "    11  line 11\n    12  line 12\n-- page 3/3 (12 items) --\n"
        );
    }

    #[test]
    fn test_render_empty() {
        let mut list: PagedList<String> = PagedList::detached(5).unwrap();
        let mut out = Vec::new();
        render(&mut list, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "(no items)\n-- page 0/0 (0 items) --\n");
    }

    #[test]
    fn test_run_session() {
        let mut list = PagedList::new(lines(30), 10).unwrap();
        let input = Cursor::new("n\nn\nn\ng zero\ns 7\nins 0 top\nq\nn\n");
        let mut out = Vec::new();

        run(&mut list, input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("-- page 3/3 (30 items) --"));
        assert!(text.contains("error: "));
        assert!(text.contains("     1  top"));
        assert!(text.contains("-- page 1/5 (31 items) --"));
        assert_eq!(list.window().page_number(), 0);
        assert_eq!(list.len(), 31);
    }

    #[rstest]
    #[case::delete(BrowseCommand::Delete { index: 0, count: 1 }, "    11  line 12\n", "    20  line 21\n", 29)]
    #[case::insert(
        BrowseCommand::Insert { index: 3, text: "new".to_string() },
        "    11  line 10\n",
        "    20  line 19\n",
        31
    )]
    fn test_edit_before_page_shows_shifted_lines(
        #[case] command: BrowseCommand,
        #[case] first: &str,
        #[case] last: &str,
        #[case] total: usize,
    ) {
        let mut list = PagedList::new(lines(30), 10).unwrap();
        list.set_page(2).unwrap();
        render(&mut list, &mut Vec::new()).unwrap();

        assert!(apply(&mut list, command).unwrap());
        let mut out = Vec::new();
        render(&mut list, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(first), "{text}");
        assert!(text.contains(last), "{text}");
        assert!(text.ends_with(&format!("-- page 2/{} ({total} items) --\n", total.div_ceil(10))));
    }

    #[test]
    fn test_apply_delete_on_current_page() {
        let mut list = PagedList::new(lines(20), 10).unwrap();
        list.set_page(2).unwrap();
        assert!(apply(&mut list, BrowseCommand::Delete { index: 10, count: 10 }).unwrap());
        assert_eq!(list.window().page_number(), 0);
        assert_eq!(list.page_count(), 1);
    }
}

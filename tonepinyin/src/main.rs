//! Terminal front end for tonepinyin.
//!
//! Run with: cargo run -p tonepinyin -- [convert|segments|compile] ...
//! Without a subcommand an interactive loop starts.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand};
use libime_core::utils::normalize;
use tonepinyin::{
    Config, ConvertError, Dictionary, Engine, PageCursor, PinyinConfig, Segmentation,
    DICTIONARY_BINCODE, DICTIONARY_FST,
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "tonepinyin", version, about = "Convert tonal pinyin into Chinese candidates")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON dictionary file
    #[arg(long, global = true)]
    dict: Option<PathBuf>,

    /// Directory with compiled dictionary.fst + dictionary.bincode
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Candidates per page
    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one input and print the first page of candidates
    Convert { input: String },
    /// Print every segmentation of the input in search order
    Segments { input: String },
    /// Compile a JSON dictionary into fst + bincode artifacts
    Compile { json: PathBuf, out_dir: PathBuf },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<PinyinConfig> {
    let mut config = match &cli.config {
        Some(path) => PinyinConfig::load_toml(path)?,
        None => PinyinConfig::default(),
    };
    if let Some(size) = cli.page_size {
        config.base.page_size = size;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    } else if let Some(dict) = &cli.dict {
        config.data_dir = None;
        config.dictionary_path = Some(dict.clone());
    }
    fit_page_to_keys(&mut config.base);
    Ok(config)
}

/// Every word on a page needs a selection key, so pages never grow past the
/// number of keys.
fn fit_page_to_keys(config: &mut Config) {
    let keys = config.select_keys().chars().count().max(1);
    if config.page_size > keys {
        tracing::warn!(
            page_size = config.page_size,
            keys,
            "page size exceeds selection keys, shrinking pages"
        );
        config.page_size = keys;
    }
}

fn build_engine(cli: &Cli) -> anyhow::Result<Engine> {
    Engine::from_config(&load_config(cli)?)
}

fn render_page(cursor: &PageCursor, config: &Config) -> String {
    let page = cursor.current_page();
    let mut keys = config.select_keys().chars();
    let mut out = page
        .words
        .iter()
        .enumerate()
        .map(|(i, word)| match keys.next() {
            Some(key) => format!("{key}. {word}"),
            None => format!("({}) {word}", i + 1),
        })
        .collect::<Vec<_>>()
        .join("  ");

    if page.has_previous || page.has_next {
        out.push_str(&format!("\n  page {}/{}", page.index + 1, cursor.page_count()));
        if page.has_previous {
            out.push_str("  [<] previous");
        }
        if page.has_next {
            out.push_str("  [>] next");
        }
    }
    out
}

fn describe(err: &ConvertError) -> &'static str {
    match err {
        ConvertError::EmptyInput => "please enter pinyin",
        ConvertError::NotRecognized(_) => "pinyin not recognized",
        ConvertError::NoCandidates(_) => "no candidates found",
    }
}

fn convert_once(engine: &Engine, input: &str) {
    match engine.input(input) {
        Ok(conv) => {
            println!("{}", conv.segmentation);
            println!("{}", render_page(&conv.cursor, engine.config()));
        }
        Err(err) => println!("{}", describe(&err)),
    }
}

fn segments_of(engine: &Engine, input: &str) -> Result<Vec<Segmentation>, ConvertError> {
    let segs = engine.segmentations(input);
    match segs.first() {
        None => Err(ConvertError::NotRecognized(normalize(input))),
        Some(seg) if seg.is_empty() => Err(ConvertError::EmptyInput),
        Some(_) => Ok(segs),
    }
}

fn print_segments(engine: &Engine, input: &str) {
    let segs = match segments_of(engine, input) {
        Ok(segs) => segs,
        Err(err) => {
            println!("{}", describe(&err));
            return;
        }
    };
    for (i, seg) in segs.iter().enumerate() {
        let candidates = engine.candidates_for(seg);
        println!("{}. {}  ({} candidates)", i + 1, seg, candidates.len());
    }
}

fn compile(json: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let dict = Dictionary::load_json(json)?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;
    dict.write_fst_bincode(out_dir.join(DICTIONARY_FST), out_dir.join(DICTIONARY_BINCODE))?;
    println!("compiled {} keys into {}", dict.len(), out_dir.display());
    Ok(())
}

fn single_char(line: &str) -> Option<char> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Apply one interactive line and return what to print.
///
/// While candidates are shown, `<`, `>` and selection keys act on the cursor
/// and never start a new conversion. Any other line converts from scratch.
fn handle_line(engine: &Engine, cursor: &mut Option<PageCursor>, line: &str) -> String {
    let config = engine.config();

    if let (Some(ch), Some(cur)) = (single_char(line), cursor.as_mut()) {
        match ch {
            '>' => {
                return if cur.advance() {
                    render_page(cur, config)
                } else {
                    "already on the last page".to_string()
                };
            }
            '<' => {
                return if cur.retreat() {
                    render_page(cur, config)
                } else {
                    "already on the first page".to_string()
                };
            }
            _ => {}
        }
        if config.selection_key_index(ch).is_some() {
            return match cur.select_by_key(ch, config).map(str::to_string) {
                Some(word) => {
                    *cursor = None;
                    format!("committed: {word}")
                }
                None => format!("no candidate on key {ch}"),
            };
        }
    }

    match engine.input(line) {
        Ok(conv) => {
            let out = render_page(&conv.cursor, config);
            *cursor = Some(conv.cursor);
            out
        }
        Err(err) => {
            *cursor = None;
            describe(&err).to_string()
        }
    }
}

fn interactive(engine: &Engine) -> anyhow::Result<()> {
    println!("Type pinyin (e.g. zhong1guo2, renmin) and press Enter.");
    println!("'<' / '>' turn pages, selection keys pick a word, 'quit' exits.");

    let mut cursor: Option<PageCursor> = None;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "quit" {
            break;
        }
        println!("{}", handle_line(engine, &mut cursor, line));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::Compile { json, out_dir }) => compile(json, out_dir)?,
        Some(Command::Convert { input }) => convert_once(&build_engine(&cli)?, input),
        Some(Command::Segments { input }) => print_segments(&build_engine(&cli)?, input),
        None => interactive(&build_engine(&cli)?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("w{i}")).collect()
    }

    fn engine() -> Engine {
        Engine::with_default_dictionary()
    }

    #[test]
    fn render_lists_every_word_on_the_page() {
        let out = render_page(&PageCursor::new(words(12), 12), &Config::default());
        assert!(out.starts_with("1. w1  2. w2"));
        assert!(out.contains("9. w9"));
        assert!(out.contains("(10) w10"));
        assert!(out.contains("(12) w12"));
        assert!(!out.contains("page"));
    }

    #[test]
    fn render_shows_navigation_hints() {
        let mut cursor = PageCursor::new(words(11), 9);
        let out = render_page(&cursor, &Config::default());
        assert!(out.contains("page 1/2"));
        assert!(out.contains("[>] next"));
        assert!(!out.contains("[<] previous"));

        cursor.advance();
        let out = render_page(&cursor, &Config::default());
        assert!(out.starts_with("1. w10  2. w11"));
        assert!(out.contains("[<] previous"));
        assert!(!out.contains("[>] next"));
    }

    #[test]
    fn page_size_is_capped_by_selection_keys() {
        let mut config = Config {
            page_size: 12,
            ..Config::default()
        };
        fit_page_to_keys(&mut config);
        assert_eq!(config.page_size, 9);

        let mut config = Config {
            page_size: 4,
            ..Config::default()
        };
        fit_page_to_keys(&mut config);
        assert_eq!(config.page_size, 4);
    }

    #[test]
    fn cli_page_size_larger_than_keys_keeps_every_word_selectable() {
        let cli = Cli::parse_from(["tonepinyin", "--page-size", "12"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.base.page_size, 9);

        let engine = Engine::from_config(&config).unwrap();
        let mut cursor = None;
        handle_line(&engine, &mut cursor, "zhong1");
        assert_eq!(handle_line(&engine, &mut cursor, ">"), "1. 螽  2. 种\n  page 2/2  [<] previous");
    }

    #[test]
    fn paging_keys_past_the_ends_keep_the_candidates() {
        let engine = engine();
        let mut cursor = None;
        handle_line(&engine, &mut cursor, "zhong1");

        assert_eq!(handle_line(&engine, &mut cursor, "<"), "already on the first page");
        assert!(handle_line(&engine, &mut cursor, ">").starts_with("1. 螽  2. 种"));
        assert_eq!(handle_line(&engine, &mut cursor, ">"), "already on the last page");
        assert_eq!(cursor.as_ref().map(PageCursor::page_index), Some(1));

        assert_eq!(handle_line(&engine, &mut cursor, "1"), "committed: 螽");
        assert!(cursor.is_none());
    }

    #[test]
    fn key_without_word_keeps_the_candidates() {
        let engine = engine();
        let mut cursor = None;
        handle_line(&engine, &mut cursor, "zhong1");
        handle_line(&engine, &mut cursor, ">");

        assert_eq!(handle_line(&engine, &mut cursor, "5"), "no candidate on key 5");
        assert!(cursor.is_some());
        assert_eq!(handle_line(&engine, &mut cursor, "2"), "committed: 种");
    }

    #[test]
    fn other_lines_start_a_new_conversion() {
        let engine = engine();
        let mut cursor = None;
        handle_line(&engine, &mut cursor, "zhong1");

        assert_eq!(handle_line(&engine, &mut cursor, "zhong1guo2"), "1. 中国");
        assert_eq!(cursor.as_ref().map(PageCursor::len), Some(1));

        assert_eq!(handle_line(&engine, &mut cursor, "abc123"), "pinyin not recognized");
        assert!(cursor.is_none());
    }

    #[test]
    fn keys_without_candidates_are_converted() {
        let engine = engine();
        let mut cursor = None;
        assert_eq!(handle_line(&engine, &mut cursor, ">"), "pinyin not recognized");
        assert_eq!(handle_line(&engine, &mut cursor, "1"), "pinyin not recognized");
        assert!(cursor.is_none());
    }

    #[test]
    fn segments_report_normalized_input() {
        let engine = engine();
        assert_eq!(
            segments_of(&engine, "  ABC123 "),
            Err(ConvertError::NotRecognized("abc123".to_string()))
        );
        assert_eq!(
            segments_of(&engine, "  ABC123 ").unwrap_err(),
            engine.convert("  ABC123 ").unwrap_err()
        );
        assert_eq!(segments_of(&engine, "   "), Err(ConvertError::EmptyInput));

        let segs = segments_of(&engine, "renmin").unwrap();
        assert_eq!(segs[0], Segmentation::from(["ren", "min"]));
    }
}

//! Line-oriented word search runner (default binary).
//!
//! Reads one command per line from stdin and prints the result. It is a
//! thin driver for the engine, not a UI; type `help` for the command list.

use std::io::{self, BufRead, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use word_search::adapter::SyncAdapter;
use word_search::core::{GameStateView, GameSummary};
use word_search::engine::{Game, GameResponse};
use word_search::storage::{
    load_session_file, save_session_file, FileStore, GameResult, GameStorage,
};
use word_search::types::{Category, Difficulty, GameCommand};
use word_search::AppConfig;

const HELP: &str = "\
commands:
  new [category] [difficulty] [seconds]   start a game (defaults from settings)
  select R1 C1 R2 C2                      drag from (R1,C1) to (R2,C2)
  pause                                   pause or resume
  hint N                                  endpoints of word N
  state                                   show the board
  save PATH | load PATH                   session file
  slot [NAME] | slots | resume ID         saved game slots
  stats | achievements | usage            stored data
  export PATH | import PATH               settings/statistics bundle
  quit";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::from_env().with_args(&args)?;
    let seed = config.seed.unwrap_or_else(time_seed);
    tracing::info!(data_dir = %config.data_dir.display(), seed, tick_ms = config.tick_ms, "starting");

    let store = FileStore::open(&config.data_dir)?;
    let storage = GameStorage::open(store, Utc::now())?;
    let adapter = SyncAdapter::with_tick_period(Game::with_seed(seed), Duration::from_millis(config.tick_ms))?;

    let mut runner = Runner { adapter, storage };
    runner.run()
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

struct Runner {
    adapter: SyncAdapter,
    storage: GameStorage<FileStore>,
}

impl Runner {
    fn run(&mut self) -> Result<()> {
        println!("{HELP}");
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            self.drain_summaries()?;
            print!("> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            let Some((&cmd, rest)) = words.split_first() else {
                continue;
            };
            if cmd == "quit" || cmd == "exit" {
                break;
            }

            if let Err(err) = self.execute(cmd, rest) {
                println!("error: {err:#}");
            }
        }

        self.drain_summaries()?;
        self.autosave()
    }

    fn execute(&mut self, cmd: &str, rest: &[&str]) -> Result<()> {
        match cmd {
            "help" => println!("{HELP}"),
            "new" => self.new_game(rest)?,
            "select" => self.select(rest)?,
            "pause" => {
                if let GameResponse::Paused { is_paused } = self.adapter.send(GameCommand::TogglePause)? {
                    println!("{}", if is_paused { "paused" } else { "running" });
                }
            }
            "hint" => {
                let index = parse_arg::<usize>(rest, 0, "word number")?;
                match self.adapter.send(GameCommand::GetHint { index })? {
                    GameResponse::Hint { hint: Some(h) } => println!(
                        "{} runs {} from ({}, {}) to ({}, {})",
                        h.word,
                        h.direction.as_str(),
                        h.first_letter.row,
                        h.first_letter.col,
                        h.last_letter.row,
                        h.last_letter.col
                    ),
                    _ => println!("no hint available"),
                }
            }
            "state" => match self.adapter.send(GameCommand::GetState)? {
                GameResponse::State { state: Some(state) } => print_state(&state),
                _ => println!("no game"),
            },
            "save" => {
                let path = rest.first().ok_or_else(|| anyhow!("save needs a path"))?;
                let session = self.adapter.snapshot()?.ok_or_else(|| anyhow!("no game to save"))?;
                save_session_file(path, &session)?;
                println!("saved to {path}");
            }
            "load" => {
                let path = rest.first().ok_or_else(|| anyhow!("load needs a path"))?;
                let session = load_session_file(path)?;
                let board = self.adapter.load_session(session)?;
                println!("loaded {}x{} board", board.size, board.size);
            }
            "slot" => {
                let session = self.adapter.snapshot()?.ok_or_else(|| anyhow!("no game to save"))?;
                let name = (!rest.is_empty()).then(|| rest.join(" "));
                let id = self.storage.save_game(session, name, Utc::now())?;
                println!("saved in slot {id}");
            }
            "slots" => {
                for game in self.storage.saved_games()? {
                    println!("{}  {}  {}", game.id, game.saved_at.format("%Y-%m-%d %H:%M"), game.name);
                }
            }
            "resume" => {
                let id = parse_arg::<i64>(rest, 0, "slot id")?;
                let session = self.storage.load_game(id)?;
                let board = self.adapter.load_session(session)?;
                println!("resumed {}x{} board", board.size, board.size);
            }
            "stats" => {
                let s = self.storage.statistics()?;
                println!(
                    "played {} completed {} ({:.0}%)  best {}  average {}  streak {} (longest {})  fastest {}s",
                    s.games_played,
                    s.games_completed,
                    s.completion_rate(),
                    s.best_score,
                    s.average_score,
                    s.current_streak,
                    s.longest_streak,
                    s.fastest_completion
                );
            }
            "achievements" => {
                let a = self.storage.achievements()?;
                println!(
                    "first win {}  speed demon {}  perfect {}  all categories {}  master {}",
                    a.first_win, a.speed_demon, a.perfect_score, a.special.all_categories, a.special.master
                );
            }
            "usage" => {
                let usage = self.storage.storage_usage()?;
                for (key, bytes) in &usage.breakdown {
                    println!("{key:>14}  {bytes}");
                }
                println!("{:>14}  {}", "total", usage.total_formatted);
            }
            "export" => {
                let path = rest.first().ok_or_else(|| anyhow!("export needs a path"))?;
                std::fs::write(path, self.storage.export_data(Utc::now())?)
                    .with_context(|| format!("writing {path}"))?;
                println!("exported to {path}");
            }
            "import" => {
                let path = rest.first().ok_or_else(|| anyhow!("import needs a path"))?;
                let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
                self.storage.import_data(&json)?;
                println!("imported {path}");
            }
            other => println!("unknown command: {other} (try help)"),
        }
        Ok(())
    }

    fn new_game(&mut self, rest: &[&str]) -> Result<()> {
        let settings = self.storage.settings()?;
        let category = match rest.first() {
            Some(s) => Category::from_str(s).ok_or_else(|| anyhow!("unknown category: {s}"))?,
            None => settings.category,
        };
        let difficulty = match rest.get(1) {
            Some(s) => Difficulty::from_str(s).ok_or_else(|| anyhow!("unknown difficulty: {s}"))?,
            None => settings.difficulty,
        };
        let time_limit = match rest.get(2) {
            Some(_) => parse_arg::<u32>(rest, 2, "time limit")?,
            None => settings.time_limit,
        };

        let command = GameCommand::NewGame {
            category,
            difficulty,
            time_limit,
        };
        if let GameResponse::Board(board) = self.adapter.send(command)? {
            println!("{} words on a {}x{} board", board.words.len(), board.size, board.size);
        }
        if let GameResponse::State { state: Some(state) } = self.adapter.send(GameCommand::GetState)? {
            print_state(&state);
        }
        Ok(())
    }

    fn select(&mut self, rest: &[&str]) -> Result<()> {
        let r1 = parse_arg::<i32>(rest, 0, "start row")?;
        let c1 = parse_arg::<i32>(rest, 1, "start column")?;
        let r2 = parse_arg::<i32>(rest, 2, "end row")?;
        let c2 = parse_arg::<i32>(rest, 3, "end column")?;

        let GameResponse::SelectionStarted { accepted: true } =
            self.adapter.send(GameCommand::StartSelection { row: r1, col: c1 })?
        else {
            println!("selection not accepted");
            return Ok(());
        };
        self.adapter.send(GameCommand::UpdateSelection { row: r2, col: c2 })?;

        match self.adapter.send(GameCommand::EndSelection)? {
            GameResponse::SelectionEnded { found: Some(found) } => {
                println!("found {} (+{})", found.placed.word, found.points);
            }
            _ => println!("no word there"),
        }
        Ok(())
    }

    /// Record every game that ended since the last prompt
    fn drain_summaries(&mut self) -> Result<()> {
        while let Some(summary) = self.adapter.try_recv_summary() {
            print_summary(&summary);
            let result = GameResult::from_summary(&summary);
            for achievement in self.storage.finish_game(&result, Utc::now())? {
                println!("achievement unlocked: {}", achievement.title);
            }
        }
        Ok(())
    }

    fn autosave(&mut self) -> Result<()> {
        if !self.storage.settings()?.auto_save {
            return Ok(());
        }
        if let Some(session) = self.adapter.snapshot()? {
            if !session.is_finished() {
                let id = self.storage.save_game(session, Some("autosave".to_string()), Utc::now())?;
                tracing::info!(id, "game autosaved");
            }
        }
        Ok(())
    }
}

fn parse_arg<T: std::str::FromStr>(rest: &[&str], index: usize, what: &str) -> Result<T> {
    let raw = rest.get(index).ok_or_else(|| anyhow!("missing {what}"))?;
    raw.parse().map_err(|_| anyhow!("invalid {what}: {raw}"))
}

fn print_state(state: &GameStateView) {
    print!("   ");
    for col in 0..state.grid.size() {
        print!("{:>2}", col % 10);
    }
    println!();
    for (r, row) in state.grid.rows().enumerate() {
        print!("{r:>2} ");
        for cell in row {
            print!(" {}", cell.letter.unwrap_or('.'));
        }
        println!();
    }

    for (i, word) in state.words.iter().enumerate() {
        let mark = if state.found_words.contains(word) { "x" } else { " " };
        println!("[{mark}] {i:>2} {word}");
    }

    let timer = if state.time_limit > 0 {
        format!("{:.0}/{}s", state.current_time, state.time_limit)
    } else {
        format!("{:.0}s", state.current_time)
    };
    println!(
        "score {}  progress {:.0}%  time {}{}",
        state.score,
        state.progress,
        timer,
        if state.is_paused { "  (paused)" } else { "" }
    );
}

fn print_summary(summary: &GameSummary) {
    let outcome = if summary.completed() { "completed" } else { "time is up" };
    println!(
        "{outcome}: {}/{} words, score {} (bonus {}), {:.0}s",
        summary.words_found,
        summary.total_words,
        summary.final_score,
        summary.completion_bonus,
        summary.elapsed_secs
    );
}

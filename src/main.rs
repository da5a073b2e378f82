#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::error::Error;
    use std::io::{self, BufRead, Write};
    use std::thread;

    use crossbeam::channel;
    use elemquiz::{
        AppConfig, ElementField, ElementRecord, ElementRepository, FileStore, GRID_COLUMNS,
        GRID_ROWS, QuizPhase, QuizSession, SelectionFilter, ThreadScheduler, Tile, TimerEvent,
        builtin_elements, category_label,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    type CliResult = Result<(), Box<dyn Error>>;

    const USAGE: &str = "usage: elemquiz <command>

commands:
  table [query]                 print the periodic table, dimming tiles that do not match
  show <number>                 print element details
  edit <number> <field> <value> change one field of an element
  reset                         drop every edit
  quiz                          timed quiz over the whole table";

    enum QuizInput {
        Timer(TimerEvent),
        Line(String),
        Closed,
    }

    impl From<TimerEvent> for QuizInput {
        fn from(event: TimerEvent) -> Self {
            QuizInput::Timer(event)
        }
    }

    pub fn run() -> CliResult {
        pretty_env_logger::init();

        let config = AppConfig::load();
        let store = FileStore::new(config.resolve_data_dir());
        log::debug!("element edits stored under {}", store.dir().display());
        let mut repository = ElementRepository::open(builtin_elements(), store);

        let args: Vec<String> = std::env::args().skip(1).collect();
        let command = args.first().map(String::as_str).unwrap_or("table");

        match command {
            "table" => print_table(&repository, &args[1.min(args.len())..].join(" ")),
            "show" => show(&repository, parse_number(args.get(1))?),
            "edit" => {
                let number = parse_number(args.get(1))?;
                let field = ElementField::parse(args.get(2).map(String::as_str).unwrap_or(""))?;
                let value = args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
                repository.edit_field(number, field, &value)?;
                show(&repository, number)
            }
            "reset" => {
                repository.reset_overlay();
                println!("모든 편집을 초기화했습니다.");
                Ok(())
            }
            "quiz" => run_quiz(repository.effective(), &config),
            _ => {
                println!("{}", USAGE);
                Ok(())
            }
        }
    }

    fn parse_number(raw: Option<&String>) -> Result<u32, Box<dyn Error>> {
        let raw = raw.ok_or("missing atomic number")?;
        Ok(raw.parse::<u32>()?)
    }

    fn print_table(repository: &ElementRepository<FileStore>, query: &str) -> CliResult {
        let mut filter = SelectionFilter::new();
        filter.set_query(query);
        let tiles = filter.tiles(&repository.effective(), &repository.edited_numbers());

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in grid_lines(&tiles) {
            writeln!(out, "{}", line)?;
        }

        if !query.is_empty() {
            let hits = tiles.iter().filter(|tile| !tile.dimmed).count();
            writeln!(out, "\n'{}': {}개 원소", query, hits)?;
        }

        Ok(())
    }

    /// Lays tiles out on the 18x10 grid. Tiles whose edited position falls off
    /// the grid are left out.
    fn grid_lines(tiles: &[Tile]) -> Vec<String> {
        let mut grid = vec![vec!["    ".to_string(); GRID_COLUMNS as usize]; GRID_ROWS as usize];

        for tile in tiles {
            let cell = tile
                .row
                .checked_sub(1)
                .zip(tile.column.checked_sub(1))
                .and_then(|(row, column)| grid.get_mut(row as usize)?.get_mut(column as usize));
            let Some(cell) = cell else {
                log::warn!(
                    "element {} sits outside the grid at column {}, row {}",
                    tile.number,
                    tile.column,
                    tile.row
                );
                continue;
            };

            *cell = if tile.dimmed {
                " .. ".to_string()
            } else if tile.edited {
                format!("{:>3}*", tile.symbol)
            } else {
                format!("{:>3} ", tile.symbol)
            };
        }

        grid.into_iter()
            .map(|row| row.concat().trim_end().to_string())
            .collect()
    }

    fn show(repository: &ElementRepository<FileStore>, number: u32) -> CliResult {
        let element = repository
            .find(number)
            .ok_or_else(|| format!("no element with atomic number {}", number))?;
        print_detail(&element, repository.is_edited(number));
        Ok(())
    }

    fn print_detail(element: &ElementRecord, edited: bool) {
        println!(
            "{:>3}  {}  {}{}",
            element.number,
            element.symbol,
            element.mass_label(),
            if edited { "  (편집됨)" } else { "" }
        );
        println!("{} ({})", element.name_ko, element.name);
        println!("[{}]", category_label(element.category));
        if !element.summary_text().is_empty() {
            println!("\n{}\n", element.summary_text());
        }
        println!("상태       {}", element.phase);
        println!("발견자     {}", element.discoverer_label());
        println!("밀도       {}", element.density_label());
        println!("녹는점     {}", element.melt_label());
        println!("끓는점     {}", element.boil_label());
        println!("전자 배치  {}", element.electron_configuration);
        println!("{}", element.source);
    }

    fn run_quiz(elements: Vec<ElementRecord>, config: &AppConfig) -> CliResult {
        let (sender, receiver) = channel::unbounded::<QuizInput>();

        let input_sender = sender.clone();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if input_sender.send(QuizInput::Line(line)).is_err() {
                    return;
                }
            }
            let _ = input_sender.send(QuizInput::Closed);
        });

        let mut session = QuizSession::start(
            elements,
            StdRng::from_entropy(),
            ThreadScheduler::new(sender),
            config.quiz_settings(),
        );

        if session.phase() == QuizPhase::Loading {
            println!("오류: 원소 데이터를 불러올 수 없습니다.");
            session.close();
            return Ok(());
        }

        let mut shown = None;
        loop {
            render(&session, &mut shown)?;

            let Ok(input) = receiver.recv() else { break };
            match input {
                QuizInput::Timer(event) => session.dispatch(event),
                QuizInput::Closed => break,
                QuizInput::Line(line) => {
                    let line = line.trim();
                    match session.phase() {
                        QuizPhase::Finished => match line {
                            "r" => session.restart()?,
                            "q" => break,
                            _ => {}
                        },
                        _ if line == "q" => {
                            session.exit();
                        }
                        _ => {
                            let choice = line
                                .parse::<usize>()
                                .ok()
                                .and_then(|pick| pick.checked_sub(1))
                                .and_then(|index| {
                                    session
                                        .question()
                                        .and_then(|question| question.options.get(index).cloned())
                                });
                            if let Some(choice) = choice {
                                if let Some(outcome) = session.submit_answer(Some(&choice)) {
                                    if outcome.correct {
                                        println!("정답!");
                                    } else {
                                        println!("오답. 정답은 {}", outcome.correct_label);
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        session.close();
        Ok(())
    }

    /// Prints the question once when it appears, then only the countdown.
    fn render(
        session: &QuizSession<StdRng, ThreadScheduler>,
        shown: &mut Option<(usize, QuizPhase)>,
    ) -> CliResult {
        let state = (session.index(), session.phase());
        let mut out = io::stdout().lock();

        if *shown == Some(state) {
            if state.1 == QuizPhase::InProgress {
                write!(out, "\r남은 시간: {:>2}초 > ", session.time_remaining())?;
                out.flush()?;
            }
            return Ok(());
        }
        *shown = Some(state);

        match session.phase() {
            QuizPhase::InProgress => {
                if let Some(question) = session.question() {
                    writeln!(
                        out,
                        "\n문제 {} / {}   점수: {}",
                        session.index() + 1,
                        session.total(),
                        session.score()
                    )?;
                    writeln!(out, "이 원소의 이름은?  {}", question.prompt())?;
                    for (index, option) in question.options.iter().enumerate() {
                        writeln!(out, "  {}) {}", index + 1, option)?;
                    }
                    write!(out, "남은 시간: {:>2}초 > ", session.time_remaining())?;
                }
            }
            QuizPhase::AnswerRevealed => {
                if session.selected_answer().is_none() {
                    if let Some(question) = session.question() {
                        writeln!(out, "\n시간 초과! 정답은 {}", question.correct_label())?;
                    }
                }
            }
            QuizPhase::Finished => {
                if let Some(summary) = session.summary() {
                    writeln!(out, "\n퀴즈 결과")?;
                    writeln!(
                        out,
                        "{}문제 중 {}문제 정답 (정답률: {}%)",
                        summary.attempted, summary.score, summary.percentage
                    )?;
                    write!(out, "r: 다시 시작, q: 닫기 > ")?;
                }
            }
            QuizPhase::Loading => {}
        }

        out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use std::collections::BTreeSet;

        use super::*;

        fn base_tiles() -> Vec<Tile> {
            SelectionFilter::new().tiles(&builtin_elements(), &BTreeSet::new())
        }

        #[test]
        fn builtin_table_fills_the_grid() {
            let lines = grid_lines(&base_tiles());

            assert_eq!(lines.len(), GRID_ROWS as usize);
            assert!(lines[0].starts_with("  H"));
            assert!(lines[0].ends_with(" He"));
            assert!(lines[8].contains(" Ce"));
        }

        #[test]
        fn tiles_off_the_grid_are_skipped() {
            let mut tiles = base_tiles();
            tiles[0].row = 0;
            tiles[1].row = 42;
            tiles[2].column = 0;
            tiles[3].column = GRID_COLUMNS + 1;

            let lines = grid_lines(&tiles);

            assert_eq!(lines.len(), GRID_ROWS as usize);
            assert!(lines[0].is_empty());
            assert!(!lines[1].contains("Li"));
            assert!(!lines[1].contains("Be"));
            assert!(lines[1].contains(" B"));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(error) = terminal::run() {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

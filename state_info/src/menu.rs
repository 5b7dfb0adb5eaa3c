//! Interactive five-choice menu over the catalog.
//!
//! The session is generic over its input and output so it can be driven by
//! scripted input in tests. End of input at any prompt ends the session.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::core::record::parse_population;
use crate::io::viewer::AssetViewer;
use crate::render;

const MENU: &str = "\
Please select from the following choices:
1. Display all U.S. states in alphabetical order with capital, population, and flower
2. Search for a state and display its capital, population, and flower image
3. Show a bar chart of the most populous states
4. Update the population of a state
5. Exit";

/// A parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayAll,
    Search,
    TopChart,
    Update,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().parse::<u8>().ok()? {
            1 => Some(Self::DisplayAll),
            2 => Some(Self::Search),
            3 => Some(Self::TopChart),
            4 => Some(Self::Update),
            5 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user chose "Exit".
    Exit,
    /// Input closed at a prompt.
    EndOfInput,
}

enum Flow {
    Continue,
    EndOfInput,
}

pub struct MenuSession<'a, R, W> {
    catalog: &'a mut Catalog,
    viewer: Option<&'a dyn AssetViewer>,
    top_n: usize,
    chart_width: usize,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> MenuSession<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            viewer: None,
            top_n: 5,
            chart_width: 40,
            input,
            output,
        }
    }

    pub fn with_viewer(mut self, viewer: &'a dyn AssetViewer) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn with_chart(mut self, top_n: usize, chart_width: usize) -> Self {
        self.top_n = top_n;
        self.chart_width = chart_width;
        self
    }

    /// Show the menu and dispatch choices until exit or end of input.
    pub fn run(&mut self) -> Result<SessionEnd> {
        writeln!(self.output, "Welcome to the U.S. State Information application.")?;
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(raw) = self.prompt("Please enter a choice to run:")? else {
                return Ok(SessionEnd::EndOfInput);
            };
            let Some(choice) = MenuChoice::parse(&raw) else {
                debug!(input = %raw, "invalid menu choice");
                writeln!(self.output, "Invalid choice, please enter a number 1-5.\n")?;
                continue;
            };
            debug!(?choice, "menu choice");
            let flow = match choice {
                MenuChoice::DisplayAll => self.display_all()?,
                MenuChoice::Search => self.search()?,
                MenuChoice::TopChart => self.top_chart()?,
                MenuChoice::Update => self.update()?,
                MenuChoice::Exit => {
                    writeln!(self.output, "You've chosen to exit. Thanks and goodbye!")?;
                    return Ok(SessionEnd::Exit);
                }
            };
            if let Flow::EndOfInput = flow {
                return Ok(SessionEnd::EndOfInput);
            }
        }
    }

    /// Print `message` and read one line without its line ending.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.output.flush().context("flush output")?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn display_all(&mut self) -> Result<Flow> {
        let text = render::table(self.catalog.table().list_all());
        write!(self.output, "{text}")?;
        writeln!(self.output)?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        loop {
            let Some(name) = self.prompt("Please enter a state name to search:")? else {
                return Ok(Flow::EndOfInput);
            };
            let record = match self.catalog.table().find_by_name(&name) {
                Ok(record) => render::record(record),
                Err(err) => {
                    writeln!(self.output, "{err}. Please enter a valid state name.\n")?;
                    continue;
                }
            };
            write!(self.output, "{record}")?;
            self.show_flower(&name)?;
            writeln!(self.output)?;
            return Ok(Flow::Continue);
        }
    }

    fn show_flower(&mut self, name: &str) -> Result<()> {
        let path = match self.catalog.flower_image(name) {
            Ok(path) => path.to_path_buf(),
            Err(err) => {
                writeln!(self.output, "Flower image unavailable: {err}")?;
                return Ok(());
            }
        };
        writeln!(self.output, "Flower image: {}", path.display())?;
        if let Some(viewer) = self.viewer
            && let Err(err) = viewer.show(&path)
        {
            warn!(err = %format!("{err:#}"), "image viewer failed");
            writeln!(self.output, "Could not open image: {err:#}")?;
        }
        Ok(())
    }

    fn top_chart(&mut self) -> Result<Flow> {
        let top = self.catalog.table().top_n_by_population(self.top_n);
        let chart = render::bar_chart(&top, self.chart_width);
        writeln!(self.output, "Top {} states by population:", top.len())?;
        write!(self.output, "{chart}")?;
        writeln!(self.output)?;
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> Result<Flow> {
        loop {
            let Some(name) =
                self.prompt("Please enter the name of the state to update its population:")?
            else {
                return Ok(Flow::EndOfInput);
            };
            if self.catalog.table().position(&name).is_none() {
                writeln!(
                    self.output,
                    "State '{name}' does not exist, please enter a valid state name.\n"
                )?;
                continue;
            }
            let Some(raw) = self.prompt("Please enter the new population of the state:")? else {
                return Ok(Flow::EndOfInput);
            };
            let updated = match parse_population(&raw) {
                Ok(value) => self
                    .catalog
                    .update_population(&name, value)
                    .map(render::record),
                Err(err) => Err(err),
            };
            match updated {
                Ok(record) => {
                    write!(self.output, "{record}")?;
                    writeln!(self.output)?;
                    return Ok(Flow::Continue);
                }
                Err(err) => {
                    writeln!(
                        self.output,
                        "{err}. Please enter a state name and a non-negative whole number.\n"
                    )?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::assets::AssetIndex;
    use crate::test_support::{RecordingViewer, sample_table};
    use std::io::Cursor;

    fn catalog() -> Catalog {
        Catalog::new(sample_table(), AssetIndex::default())
    }

    fn run_script(catalog: &mut Catalog, script: &str) -> (SessionEnd, String) {
        let mut out = Vec::new();
        let end = MenuSession::new(catalog, Cursor::new(script.to_string()), &mut out)
            .run()
            .expect("session");
        (end, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn parse_accepts_one_through_five() {
        assert_eq!(MenuChoice::parse(" 1\n"), Some(MenuChoice::DisplayAll));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("two"), None);
    }

    #[test]
    fn exit_choice_ends_session() {
        let mut catalog = catalog();
        let (end, out) = run_script(&mut catalog, "5\n");
        assert_eq!(end, SessionEnd::Exit);
        assert!(out.starts_with("Welcome"));
        assert!(out.contains("goodbye"));
    }

    #[test]
    fn end_of_input_ends_session() {
        let mut catalog = catalog();
        let (end, _) = run_script(&mut catalog, "");
        assert_eq!(end, SessionEnd::EndOfInput);
    }

    #[test]
    fn invalid_choices_re_prompt() {
        let mut catalog = catalog();
        let (end, out) = run_script(&mut catalog, "9\nabc\n5\n");
        assert_eq!(end, SessionEnd::Exit);
        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert_eq!(out.matches("1. Display all").count(), 3);
    }

    #[test]
    fn display_all_prints_every_state() {
        let mut catalog = catalog();
        let (_, out) = run_script(&mut catalog, "1\n5\n");
        for name in ["Alaska", "California", "Ohio", "Texas", "Vermont"] {
            assert!(out.contains(name), "missing {name}");
        }
    }

    #[test]
    fn search_re_prompts_until_found() {
        let mut catalog = catalog();
        let (end, out) = run_script(&mut catalog, "2\nohio\nOhio\n5\n");
        assert_eq!(end, SessionEnd::Exit);
        assert!(out.contains("no state named 'ohio'"));
        assert!(out.contains("Capital:    Columbus"));
        assert!(out.contains("Flower image unavailable: no image found for 'Ohio'"));
    }

    #[test]
    fn search_opens_image_with_viewer() {
        let fixture = crate::test_support::Fixture::sample().expect("fixture");
        let table = sample_table();
        let assets = AssetIndex::resolve(
            &fixture.assets_dir(),
            &table,
            crate::io::config::AssetStrategy::ByName,
        )
        .expect("assets");
        let mut catalog = Catalog::new(table, assets);
        let viewer = RecordingViewer::default();
        let mut out = Vec::new();
        MenuSession::new(&mut catalog, Cursor::new("2\nTexas\n5\n"), &mut out)
            .with_viewer(&viewer)
            .run()
            .expect("session");
        let shown = viewer.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].ends_with("texas.jpg"));
        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("Flower image: "));
    }

    #[test]
    fn viewer_failure_is_reported_not_fatal() {
        let fixture = crate::test_support::Fixture::sample().expect("fixture");
        let table = sample_table();
        let assets = AssetIndex::resolve(
            &fixture.assets_dir(),
            &table,
            crate::io::config::AssetStrategy::ByName,
        )
        .expect("assets");
        let mut catalog = Catalog::new(table, assets);
        let viewer = RecordingViewer {
            fail: true,
            ..RecordingViewer::default()
        };
        let mut out = Vec::new();
        let end = MenuSession::new(&mut catalog, Cursor::new("2\nOhio\n5\n"), &mut out)
            .with_viewer(&viewer)
            .run()
            .expect("session");
        assert_eq!(end, SessionEnd::Exit);
        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("Could not open image"));
    }

    #[test]
    fn chart_shows_configured_number_of_states() {
        let mut catalog = catalog();
        let mut out = Vec::new();
        MenuSession::new(&mut catalog, Cursor::new("3\n5\n"), &mut out)
            .with_chart(2, 10)
            .run()
            .expect("session");
        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("Top 2 states by population:"));
        assert!(out.contains("California | ########## 39538223"));
        assert!(out.contains("Texas      | ####### 29145505"));
        assert!(!out.contains("Ohio       |"));
    }

    #[test]
    fn update_re_prompts_on_bad_input_then_applies() {
        let mut catalog = catalog();
        let script = "4\nAtlantis\nOhio\n-3\nOhio\nlots\nOhio\n42\n5\n";
        let (end, out) = run_script(&mut catalog, script);
        assert_eq!(end, SessionEnd::Exit);
        assert!(out.contains("State 'Atlantis' does not exist"));
        assert!(out.contains("must not be negative"));
        assert!(out.contains("not an integer"));
        assert!(out.contains("Population: 42"));
        assert_eq!(
            catalog.table().find_by_name("Ohio").expect("ohio").population,
            42
        );
    }

    #[test]
    fn update_is_reflected_in_later_chart() {
        let mut catalog = catalog();
        let mut out = Vec::new();
        MenuSession::new(
            &mut catalog,
            Cursor::new("4\nCalifornia\n100\n3\n5\n"),
            &mut out,
        )
        .with_chart(1, 10)
        .run()
        .expect("session");
        let out = String::from_utf8(out).expect("utf8");
        let chart = out.split("Top 1 states by population:").nth(1).expect("chart");
        assert!(chart.trim_start().starts_with("Texas"));
    }

    #[test]
    fn end_of_input_mid_update_leaves_table_unchanged() {
        let mut catalog = catalog();
        let before = catalog.table().clone();
        let (end, _) = run_script(&mut catalog, "4\nOhio\n");
        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(catalog.table(), &before);
    }
}

mod listing;
mod paths;
mod terminal;

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use listsel::{
    CheckSelectModel, ControllerConfig, ListSelection, Permutation, PointerEvent, SelectionConfig,
    SelectionController,
};
use simplelog::{Config, LevelFilter, WriteLogger};

use listing::{Listing, SortBy};
use terminal::{Line, Terminal};

/// Rows taken by the header and the status line.
const CHROME_ROWS: usize = 2;
/// Columns of the `[x] ` checkmark cell.
const CHECKMARK_COLS: u16 = 4;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    listing: Listing,
    selection: CheckSelectModel,
    controller: SelectionController,
    status: Rc<RefCell<String>>,
    scroll: usize,
    viewport: usize,
}

impl App {
    fn open(dir: &Path) -> io::Result<Self> {
        let mut app = Self {
            listing: Listing::default(),
            selection: CheckSelectModel::default(),
            controller: SelectionController::new(ControllerConfig::default()),
            status: Rc::new(RefCell::new(String::new())),
            scroll: 0,
            viewport: 0,
        };
        app.load(dir)?;
        Ok(app)
    }

    /// Show `dir`. The list identity changes, so the model is replaced.
    fn load(&mut self, dir: &Path) -> io::Result<()> {
        let listing = Listing::read(dir, self.listing.sort)?;
        log::info!("opened {:?} ({} entries)", dir, listing.len());

        let mut selection = CheckSelectModel::with_config(&SelectionConfig::new(listing.len()));
        let status = Rc::clone(&self.status);
        let id = selection.add_listener(move |model, change| {
            log::debug!(
                "selection {:?} -> {:?}, lead {:?} -> {:?}, check-select {}",
                change.old_selected,
                model.selected_indexes(),
                change.old_lead,
                model.lead_index(),
                model.check_select_mode()
            );
            *status.borrow_mut() = format!("{} selected", model.selected_count());
        });
        log::debug!("status line attached as {}", id);

        self.listing = listing;
        self.selection = selection;
        self.scroll = 0;
        *self.status.borrow_mut() = dir.display().to_string();
        Ok(())
    }

    fn report(&self, result: listsel::Result<()>) {
        if let Err(e) = result {
            log::warn!("selection rejected input: {}", e);
            *self.status.borrow_mut() = e.to_string();
        }
    }

    fn apply(&mut self, permutation: &Permutation) {
        let result = self.selection.adjust_to_reordering(permutation);
        self.report(result);
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    fn on_key(&mut self, event: KeyEvent) -> Flow {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('s') if !ctrl => {
                self.listing.sort.cycle_sort_by();
                let permutation = self.listing.sort();
                self.apply(&permutation);
            }
            KeyCode::Char('r') if !ctrl => {
                self.listing.sort.toggle_order();
                let permutation = self.listing.sort();
                self.apply(&permutation);
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                let hidden = self.selection.selected_indexes();
                let permutation = self.listing.hide(&hidden);
                log::info!("hid {} entries", hidden.len());
                self.apply(&permutation);
            }
            KeyCode::F(5) => match self.listing.rescan() {
                Ok((permutation, len)) => {
                    let result = self
                        .selection
                        .adjust_to_reordering_with_length(&permutation, len);
                    self.report(result);
                }
                Err(e) => *self.status.borrow_mut() = format!("rescan failed: {}", e),
            },
            KeyCode::Enter => self.open_lead(),
            KeyCode::Backspace => {
                if let Some(parent) = self.listing.dir.parent().map(Path::to_path_buf) {
                    self.navigate(&parent);
                }
            }
            code => {
                let handled =
                    self.controller
                        .handle_key(&mut self.selection, code.into(), event.modifiers.into());
                match handled {
                    Ok(handled) => log::trace!("key {:?} handled: {}", code, handled),
                    Err(e) => self.report(Err(e)),
                }
            }
        }
        Flow::Continue
    }

    fn on_mouse(&mut self, event: MouseEvent) {
        let Some(mut pointer) = PointerEvent::from_crossterm(&event) else {
            return;
        };
        let row = event.row as usize;
        if row == 0 || row > self.viewport {
            return;
        }
        let index = Some(self.scroll + row - 1).filter(|&i| i < self.listing.len());
        if event.column < CHECKMARK_COLS {
            pointer = pointer.on_checkmark();
        }
        let result = self
            .controller
            .handle_pointer(&mut self.selection, &pointer, index);
        self.report(result);
    }

    fn open_lead(&mut self) {
        let Some(entry) = self
            .selection
            .lead_index()
            .and_then(|i| self.listing.get(i))
        else {
            return;
        };
        if entry.is_dir {
            let target = self.listing.dir.join(&entry.name);
            self.navigate(&target);
        } else {
            *self.status.borrow_mut() = format!("open {}", entry.name);
        }
    }

    fn navigate(&mut self, dir: &Path) {
        if let Err(e) = self.load(dir) {
            log::warn!("cannot open {:?}: {}", dir, e);
            *self.status.borrow_mut() = format!("cannot open {}: {}", dir.display(), e);
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn scroll_to_lead(&mut self) {
        let Some(lead) = self.selection.lead_index() else {
            return;
        };
        if lead < self.scroll {
            self.scroll = lead;
        } else if self.viewport > 0 && lead >= self.scroll + self.viewport {
            self.scroll = lead + 1 - self.viewport;
        }
    }

    fn render(&self) -> Vec<Line> {
        let sort = match (self.listing.sort.sort_by, self.listing.sort.descending) {
            (SortBy::Name, false) => "name ↑",
            (SortBy::Name, true) => "name ↓",
            (SortBy::Size, false) => "size ↑",
            (SortBy::Size, true) => "size ↓",
        };
        let mut lines = vec![Line {
            text: format!("{}  [{}]", self.listing.dir.display(), sort),
            reverse: false,
            bold: true,
        }];

        let checking = self.selection.check_select_mode();
        let lead = self.selection.lead_index();
        for (i, entry) in self
            .listing
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.viewport)
        {
            let selected = self.selection.is_selected(i);
            let mark = match (checking, selected) {
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
                (false, _) => "    ",
            };
            let focus = if lead == Some(i) { '>' } else { ' ' };
            let suffix = if entry.is_dir { "/" } else { "" };
            lines.push(Line {
                text: format!("{}{} {}{}", mark, focus, entry.name, suffix),
                reverse: selected,
                bold: false,
            });
        }

        while lines.len() < self.viewport + 1 {
            lines.push(Line::plain(""));
        }
        lines.push(Line::plain(format!(
            "{} | q quit  s sort  r reverse  x hide  F5 rescan",
            self.status.borrow()
        )));
        lines
    }
}

fn init_logging() -> io::Result<()> {
    let level = std::env::var("LISTSEL_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Debug);
    let log_file = File::create(paths::log_file())?;
    WriteLogger::init(level, Config::default(), log_file).expect("Failed to initialize logger");
    Ok(())
}

fn main() -> io::Result<()> {
    init_logging()?;

    let dir = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir()?,
    };
    let mut app = App::open(&dir)?;
    let mut term = Terminal::new()?;

    loop {
        let (_, height) = term.size()?;
        app.viewport = (height as usize).saturating_sub(CHROME_ROWS);
        app.scroll_to_lead();
        term.draw(&app.render())?;

        for event in term.poll(None)? {
            match event {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key) == Flow::Quit {
                        log::info!("quit");
                        return Ok(());
                    }
                }
                CrosstermEvent::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }
}

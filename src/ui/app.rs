use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tracing::error;

use crate::config::EquipPolicy;
use crate::error::{ServiceError, ServiceResult};
use crate::session::Session;

use super::forms::{ConfirmDelete, EntityField, EntityForm, ModifierField, ModifierForm, ValueForm};
use super::helpers::{centered_rect, key_hints, split_panes};
use super::screens::{BattleScreen, Detail, EntityKind, EntityList};

/// Height of the tab bar at the top of the window.
const TAB_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 4;

/// Top-level screens, in tab order.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Screen {
    Characters,
    Armors,
    Monsters,
    Equip,
    Battle,
}

const SCREENS: [Screen; 5] = [
    Screen::Characters,
    Screen::Armors,
    Screen::Monsters,
    Screen::Equip,
    Screen::Battle,
];

impl Screen {
    fn title(self) -> &'static str {
        match self {
            Screen::Characters => "Characters",
            Screen::Armors => "Equipment",
            Screen::Monsters => "Monsters",
            Screen::Equip => "Equip List",
            Screen::Battle => "Battle Menu",
        }
    }

    fn index(self) -> usize {
        SCREENS.iter().position(|screen| *screen == self).unwrap_or(0)
    }

    fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Screen::Characters => Some(EntityKind::Character),
            Screen::Armors => Some(EntityKind::Armor),
            Screen::Monsters => Some(EntityKind::Monster),
            Screen::Equip | Screen::Battle => None,
        }
    }
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    Adding(EntityForm),
    EditingValue(ValueForm),
    ConfirmDelete(ConfirmDelete),
    /// The query text lives on the list being searched.
    Searching(EntityKind),
    EditingModifiers(ModifierForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    session: Session,
    screen: Screen,
    mode: Mode,
    characters: EntityList,
    armors: EntityList,
    monsters: EntityList,
    detail: Detail,
    battle: BattleScreen,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut app = Self {
            session,
            screen: Screen::Characters,
            mode: Mode::Normal,
            characters: EntityList::new(EntityKind::Character),
            armors: EntityList::new(EntityKind::Armor),
            monsters: EntityList::new(EntityKind::Monster),
            detail: Detail::Empty,
            battle: BattleScreen::default(),
            status: None,
        };
        for kind in [EntityKind::Character, EntityKind::Armor, EntityKind::Monster] {
            app.reload_list(kind, None);
        }
        app.refresh_detail();
        app
    }

    /// Route one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Adding(form) => self.handle_add(code, form),
            Mode::EditingValue(form) => self.handle_edit_value(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::Searching(kind) => self.handle_search(code, kind),
            Mode::EditingModifiers(form) => self.handle_edit_modifiers(code, form),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
                return Mode::Normal;
            }
            KeyCode::Tab => {
                self.switch_screen(SCREENS[(self.screen.index() + 1) % SCREENS.len()]);
                return Mode::Normal;
            }
            KeyCode::BackTab => {
                let previous = (self.screen.index() + SCREENS.len() - 1) % SCREENS.len();
                self.switch_screen(SCREENS[previous]);
                return Mode::Normal;
            }
            KeyCode::Char(ch @ '1'..='5') => {
                self.switch_screen(SCREENS[ch as usize - '1' as usize]);
                return Mode::Normal;
            }
            _ => {}
        }

        match self.screen.entity_kind() {
            Some(kind) => self.handle_entity_key(kind, code),
            None if self.screen == Screen::Equip => {
                self.handle_equip_key(code);
                Mode::Normal
            }
            None => self.handle_battle_key(code),
        }
    }

    fn handle_entity_key(&mut self, kind: EntityKind, code: KeyCode) -> Mode {
        let current = self.list(kind).current().map(str::to_string);
        match code {
            KeyCode::Up => self.move_cursor(kind, |list| list.move_selection(-1)),
            KeyCode::Down => self.move_cursor(kind, |list| list.move_selection(1)),
            KeyCode::PageUp => self.move_cursor(kind, |list| list.move_selection(-10)),
            KeyCode::PageDown => self.move_cursor(kind, |list| list.move_selection(10)),
            KeyCode::Home => self.move_cursor(kind, EntityList::select_first),
            KeyCode::End => self.move_cursor(kind, EntityList::select_last),
            KeyCode::Char('+') => return Mode::Adding(EntityForm::new(kind)),
            KeyCode::Char('-') => match current {
                Some(name) => return Mode::ConfirmDelete(ConfirmDelete { kind, name }),
                None => {
                    // An empty name makes the service report "nothing selected".
                    let result = self.delete_entity(kind, "");
                    self.report(result);
                }
            },
            KeyCode::Char('e') => match (current, self.detail.value()) {
                (Some(name), Some(value)) => {
                    return Mode::EditingValue(ValueForm::new(kind, name, value));
                }
                _ => self.set_status(
                    format!("Please select a {} to edit.", kind.noun().to_lowercase()),
                    StatusKind::Warning,
                ),
            },
            KeyCode::Char('f') => {
                self.list_mut(kind).filter.get_or_insert_with(String::new);
                return Mode::Searching(kind);
            }
            KeyCode::Char('a') if kind != EntityKind::Monster => {
                self.add_to_equip(kind, current.as_deref().unwrap_or_default());
            }
            KeyCode::Char('b') if kind != EntityKind::Armor => {
                self.add_to_battle(kind, current.as_deref().unwrap_or_default());
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_equip_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('E') | KeyCode::Char('e') => match self.session.equip().equip_all() {
                Ok(inserted) => {
                    self.set_status(
                        format!(
                            "All selected characters have equipped all selected equipment! ({inserted} new links)"
                        ),
                        StatusKind::Info,
                    );
                }
                Err(err) => self.report_error(&err),
            },
            KeyCode::Char('U') | KeyCode::Char('u') => match self.session.equip().unequip_all() {
                Ok(removed) => {
                    self.set_status(
                        format!(
                            "All selected characters have unequipped all selected equipment! ({removed} links removed)"
                        ),
                        StatusKind::Info,
                    );
                }
                Err(err) => self.report_error(&err),
            },
            KeyCode::Char('c') => {
                self.session.equip().clear_selections();
                self.set_status("Equip list cleared!", StatusKind::Info);
            }
            _ => {}
        }
    }

    fn handle_battle_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Char('m') => {
                return Mode::EditingModifiers(ModifierForm::new(
                    &self.battle.character_modifier,
                    &self.battle.monster_modifier,
                ));
            }
            KeyCode::Enter => self.resolve_battle(),
            KeyCode::Char('c') => {
                self.session.battle().clear_battle();
                self.battle.last_report = None;
                self.set_status("Battle list cleared!", StatusKind::Info);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add(&mut self, code: KeyCode, mut form: EntityForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status(
                    format!("Add {} cancelled.", form.kind.noun().to_lowercase()),
                    StatusKind::Info,
                );
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.add_entity(&form) {
                Ok(name) => {
                    self.reload_list(form.kind, Some(&name));
                    self.refresh_detail();
                    self.set_status(format!("{} added!", form.kind.noun()), StatusKind::Info);
                    return Mode::Normal;
                }
                Err(err) => {
                    form.error = Some(err.to_string());
                    self.report_error(&err);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Adding(form)
    }

    fn handle_edit_value(&mut self, code: KeyCode, mut form: ValueForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.update_value(form.kind, &form.name, &form.value) {
                Ok(()) => {
                    self.refresh_detail();
                    self.set_status(
                        format!("{} of {} updated.", form.kind.value_label(), form.name),
                        StatusKind::Info,
                    );
                    return Mode::Normal;
                }
                Err(err) => {
                    form.error = Some(err.to_string());
                    self.report_error(&err);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EditingValue(form)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.delete_entity(confirm.kind, &confirm.name) {
                    Ok(()) => {
                        self.reload_list(confirm.kind, None);
                        self.refresh_detail();
                        self.set_status(
                            format!("{} deleted!", confirm.kind.noun()),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => self.report_error(&err),
                }
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    /// Incremental search: every keystroke re-runs the query, like the
    /// search boxes refreshing on key release.
    fn handle_search(&mut self, code: KeyCode, kind: EntityKind) -> Mode {
        match code {
            KeyCode::Esc => {
                self.list_mut(kind).filter = None;
                self.reload_current(kind);
                return Mode::Normal;
            }
            KeyCode::Enter => {
                let list = self.list_mut(kind);
                if list.query().is_empty() {
                    list.filter = None;
                }
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                if let Some(filter) = self.list_mut(kind).filter.as_mut() {
                    filter.pop();
                }
                self.reload_current(kind);
            }
            KeyCode::Up => self.move_cursor(kind, |list| list.move_selection(-1)),
            KeyCode::Down => self.move_cursor(kind, |list| list.move_selection(1)),
            KeyCode::Char(ch) if !ch.is_control() => {
                self.list_mut(kind)
                    .filter
                    .get_or_insert_with(String::new)
                    .push(ch);
                self.reload_current(kind);
            }
            _ => {}
        }
        Mode::Searching(kind)
    }

    fn handle_edit_modifiers(&mut self, code: KeyCode, mut form: ModifierForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Modifiers unchanged.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                self.battle.character_modifier = form.characters;
                self.battle.monster_modifier = form.monsters;
                self.set_status("Modifiers saved.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Mode::EditingModifiers(form)
    }

    fn resolve_battle(&mut self) {
        let result = self
            .session
            .battle()
            .resolve(&self.battle.character_modifier, &self.battle.monster_modifier);
        match result {
            Ok(report) => {
                self.battle.last_report = Some(report);
                self.set_status(report.to_string(), StatusKind::Info);
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn add_to_equip(&mut self, kind: EntityKind, name: &str) {
        let result = match kind {
            EntityKind::Character => self.session.equip().add_character_to_selection(name),
            EntityKind::Armor => self.session.equip().add_armor_to_selection(name),
            EntityKind::Monster => return,
        };
        match result {
            Ok(true) => self.set_status(format!("{name} added to equip list!"), StatusKind::Info),
            Ok(false) => self.set_status(
                format!("{name} is already on the equip list."),
                StatusKind::Info,
            ),
            Err(err) => self.report_error(&err),
        }
    }

    fn add_to_battle(&mut self, kind: EntityKind, name: &str) {
        let result = match kind {
            EntityKind::Character => self.session.battle().add_character_to_battle(name),
            EntityKind::Monster => self.session.battle().add_monster_to_battle(name),
            EntityKind::Armor => return,
        };
        match result {
            Ok(true) => self.set_status(format!("{name} added to battle!"), StatusKind::Info),
            Ok(false) => self.set_status(format!("{name} is already in the battle."), StatusKind::Info),
            Err(err) => self.report_error(&err),
        }
    }

    fn add_entity(&self, form: &EntityForm) -> ServiceResult<String> {
        match form.kind {
            EntityKind::Character => self
                .session
                .characters()
                .add(&form.name, &form.description, &form.value)
                .map(|character| character.name),
            EntityKind::Armor => self
                .session
                .armors()
                .add(&form.name, &form.description, &form.value)
                .map(|armor| armor.name),
            EntityKind::Monster => self
                .session
                .monsters()
                .add(&form.name, &form.description, &form.value)
                .map(|monster| monster.name),
        }
    }

    fn delete_entity(&self, kind: EntityKind, name: &str) -> ServiceResult<()> {
        match kind {
            EntityKind::Character => self.session.characters().delete(name),
            EntityKind::Armor => self.session.armors().delete(name),
            EntityKind::Monster => self.session.monsters().delete(name),
        }
    }

    fn update_value(&self, kind: EntityKind, name: &str, value: &str) -> ServiceResult<()> {
        match kind {
            EntityKind::Character => self.session.characters().update_level(name, value),
            EntityKind::Armor => self.session.armors().update_bonus(name, value),
            EntityKind::Monster => self.session.monsters().update_power(name, value),
        }
    }

    fn search(&self, kind: EntityKind, query: &str) -> ServiceResult<Vec<String>> {
        match kind {
            EntityKind::Character => self.session.characters().search(query),
            EntityKind::Armor => self.session.armors().search(query),
            EntityKind::Monster => self.session.monsters().search(query),
        }
    }

    fn list(&self, kind: EntityKind) -> &EntityList {
        match kind {
            EntityKind::Character => &self.characters,
            EntityKind::Armor => &self.armors,
            EntityKind::Monster => &self.monsters,
        }
    }

    fn list_mut(&mut self, kind: EntityKind) -> &mut EntityList {
        match kind {
            EntityKind::Character => &mut self.characters,
            EntityKind::Armor => &mut self.armors,
            EntityKind::Monster => &mut self.monsters,
        }
    }

    fn move_cursor(&mut self, kind: EntityKind, movement: impl FnOnce(&mut EntityList)) {
        movement(self.list_mut(kind));
        self.refresh_detail();
    }

    /// Re-run the list query for `kind`, keeping the cursor on `focus` when it
    /// is still listed.
    fn reload_list(&mut self, kind: EntityKind, focus: Option<&str>) {
        let query = self.list(kind).query().to_string();
        match self.search(kind, &query) {
            Ok(names) => self.list_mut(kind).set_names(names, focus),
            Err(err) => self.report_error(&err),
        }
    }

    fn reload_current(&mut self, kind: EntityKind) {
        let focus = self.list(kind).current().map(str::to_string);
        self.reload_list(kind, focus.as_deref());
        self.refresh_detail();
    }

    /// Load the record under the cursor for the detail pane.
    fn refresh_detail(&mut self) {
        let Some(kind) = self.screen.entity_kind() else {
            self.detail = Detail::Empty;
            return;
        };
        let Some(name) = self.list(kind).current().map(str::to_string) else {
            self.detail = Detail::Empty;
            return;
        };

        let detail = match kind {
            EntityKind::Character => self.session.characters().sheet(&name).map(Detail::Character),
            EntityKind::Armor => self.session.armors().get_by_name(&name).map(|armor| {
                armor.map(Detail::Armor).unwrap_or(Detail::Empty)
            }),
            EntityKind::Monster => self.session.monsters().get_by_name(&name).map(|monster| {
                monster.map(Detail::Monster).unwrap_or(Detail::Empty)
            }),
        };

        self.detail = match detail {
            Ok(detail) => detail,
            Err(err) => {
                self.report_error(&err);
                Detail::Empty
            }
        };
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        if let Some(kind) = screen.entity_kind() {
            // Bonuses may have changed on another screen.
            self.reload_current(kind);
        } else {
            self.refresh_detail();
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn report(&mut self, result: ServiceResult<()>) {
        if let Err(err) = result {
            self.report_error(&err);
        }
    }

    /// Show a failed operation in the footer. Validation and not-found errors
    /// are warnings; anything else is logged as well.
    fn report_error(&mut self, err: &ServiceError) {
        if err.is_warning() {
            self.set_status(err.to_string(), StatusKind::Warning);
        } else {
            error!(error = %err, "operation failed");
            self.set_status(err.to_string(), StatusKind::Error);
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TAB_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_tabs(frame, chunks[0]);
        match self.screen {
            Screen::Characters => self.draw_entity_screen(frame, chunks[1], &self.characters),
            Screen::Armors => self.draw_entity_screen(frame, chunks[1], &self.armors),
            Screen::Monsters => self.draw_entity_screen(frame, chunks[1], &self.monsters),
            Screen::Equip => self.draw_equip_screen(frame, chunks[1]),
            Screen::Battle => self.draw_battle_screen(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Adding(form) => self.draw_entity_form(frame, area, form),
            Mode::EditingValue(form) => self.draw_value_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(kind) => self.draw_search_bar(frame, area, *kind),
            Mode::EditingModifiers(form) => self.draw_modifier_form(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = SCREENS
            .iter()
            .enumerate()
            .map(|(idx, screen)| format!("{} {}", idx + 1, screen.title()));
        let tabs = Tabs::new(titles)
            .select(self.screen.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Tabletop RPG Manager"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_entity_screen(&self, frame: &mut Frame, area: Rect, list: &EntityList) {
        let (list_area, detail_area) = split_panes(area, 40);

        let title = match &list.filter {
            Some(filter) => format!("{} List (search: {filter})", list.kind.noun()),
            None => format!("{} List", list.kind.noun()),
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if list.names.is_empty() {
            let message = if list.filter.is_some() {
                "No matches.".to_string()
            } else {
                format!(
                    "No {} yet. Press '+' to add one.",
                    list.kind.noun().to_lowercase()
                )
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, list_area);
        } else {
            let items: Vec<ListItem> = list
                .names
                .iter()
                .map(|name| ListItem::new(name.clone()))
                .collect();
            let widget = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(list.selected));
            frame.render_stateful_widget(widget, list_area, &mut state);
        }

        let detail: Vec<Line> = self.detail.lines().into_iter().map(Line::from).collect();
        let paragraph = Paragraph::new(detail)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, detail_area);
    }

    fn draw_equip_screen(&self, frame: &mut Frame, area: Rect) {
        let (list_area, info_area) = split_panes(area, 50);

        let selection = self.session.equip_selection();
        let lines: Vec<Line> = if selection.is_empty() {
            vec![Line::from(Span::styled(
                "Nothing queued. Press [a] on the Characters or Equipment screen.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            selection
                .display_lines()
                .into_iter()
                .map(Line::from)
                .collect()
        };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Equip List"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, list_area);

        let policy = match self.session.equip_policy() {
            EquipPolicy::AllowDuplicates => "Equipping a pair twice stacks its bonus.",
            EquipPolicy::UniquePairs => "Pairs that are already equipped are skipped.",
        };
        let info = Paragraph::new(vec![
            Line::from(format!(
                "{} character(s) x {} item(s) queued.",
                selection.characters().len(),
                selection.armors().len()
            )),
            Line::from(""),
            Line::from(policy),
            Line::from("Unequip removes every link between the queued pairs."),
        ])
        .block(Block::default().borders(Borders::ALL).title("Equip"))
        .wrap(Wrap { trim: true });
        frame.render_widget(info, info_area);
    }

    fn draw_battle_screen(&self, frame: &mut Frame, area: Rect) {
        let (roster_area, result_area) = split_panes(area, 50);

        let roster = self.session.battle_roster();
        let lines = roster.display_lines();
        let lines: Vec<Line> = if lines.is_empty() {
            vec![Line::from(Span::styled(
                "Nobody in the battle yet. Press [b] on the Characters or Monsters screen.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            lines.into_iter().map(Line::from).collect()
        };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Battle List"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, roster_area);

        let mut lines = vec![
            Line::from(format!(
                "Character Modifier: {}",
                self.battle.character_modifier
            )),
            Line::from(format!("Monster Modifier: {}", self.battle.monster_modifier)),
            Line::from(""),
        ];
        match &self.battle.last_report {
            Some(report) => {
                lines.push(Line::from(Span::styled(
                    report.outcome.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(format!("Characters: {}", report.character_total)));
                lines.push(Line::from(format!("Monsters: {}", report.monster_total)));
            }
            None => lines.push(Line::from(Span::styled(
                "Press Enter to calculate the battle.",
                Style::default().fg(Color::DarkGray),
            ))),
        }
        let result = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Battle Result"))
            .wrap(Wrap { trim: true });
        frame.render_widget(result, result_area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.mode, self.screen) {
            (Mode::Searching(_), _) => key_hints(&[
                ("type", "Filter"),
                ("↑↓", "Select"),
                ("Enter", "Keep"),
                ("Esc", "Clear"),
            ]),
            (Mode::ConfirmDelete(_), _) => key_hints(&[("y", "Delete"), ("n", "Cancel")]),
            (Mode::Adding(_) | Mode::EditingModifiers(_), _) => key_hints(&[
                ("Tab", "Next Field"),
                ("Enter", "Save"),
                ("Esc", "Cancel"),
            ]),
            (Mode::EditingValue(_), _) => key_hints(&[("Enter", "Save"), ("Esc", "Cancel")]),
            (Mode::Normal, Screen::Characters) => key_hints(&[
                ("↑↓", "Select"),
                ("+", "Add"),
                ("-", "Delete"),
                ("e", "Level"),
                ("f", "Search"),
                ("a", "To Equip"),
                ("b", "To Battle"),
                ("Tab", "Next"),
                ("q", "Quit"),
            ]),
            (Mode::Normal, Screen::Armors) => key_hints(&[
                ("↑↓", "Select"),
                ("+", "Add"),
                ("-", "Delete"),
                ("e", "Bonus"),
                ("f", "Search"),
                ("a", "To Equip"),
                ("Tab", "Next"),
                ("q", "Quit"),
            ]),
            (Mode::Normal, Screen::Monsters) => key_hints(&[
                ("↑↓", "Select"),
                ("+", "Add"),
                ("-", "Delete"),
                ("e", "Power"),
                ("f", "Search"),
                ("b", "To Battle"),
                ("Tab", "Next"),
                ("q", "Quit"),
            ]),
            (Mode::Normal, Screen::Equip) => key_hints(&[
                ("E", "Equip All"),
                ("U", "Unequip All"),
                ("c", "Clear"),
                ("Tab", "Next"),
                ("q", "Quit"),
            ]),
            (Mode::Normal, Screen::Battle) => key_hints(&[
                ("Enter", "Calculate"),
                ("m", "Modifiers"),
                ("c", "Clear"),
                ("Tab", "Next"),
                ("q", "Quit"),
            ]),
        }
    }

    fn draw_entity_form(&self, frame: &mut Frame, area: Rect, form: &EntityForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let title = format!("Add {}", form.kind.noun());
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(EntityField::Name),
            form.build_line(EntityField::Description),
            form.build_line(EntityField::Value),
            Line::from(""),
        ];
        lines.push(form_hint(form.error.as_deref()));

        frame.render_widget(Paragraph::new(lines), inner);

        let (column, row) = form.cursor_offset();
        frame.set_cursor_position((inner.x + column, inner.y + row));
    }

    fn draw_value_form(&self, frame: &mut Frame, area: Rect, form: &ValueForm) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let title = format!("Update {}: {}", form.kind.value_label(), form.name);
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(),
            Line::from(""),
            form_hint(form.error.as_deref()),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        frame.set_cursor_position((inner.x + form.cursor_offset(), inner.y));
    }

    fn draw_modifier_form(&self, frame: &mut Frame, area: Rect, form: &ModifierForm) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Battle Modifiers")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(ModifierField::Characters),
            form.build_line(ModifierField::Monsters),
            Line::from(""),
            form_hint(None),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let (column, row) = form.cursor_offset();
        frame.set_cursor_position((inner.x + column, inner.y + row));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete {} '{}'?",
                confirm.kind.noun().to_lowercase(),
                confirm.name
            )),
            Line::from("Every record with this name is removed."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, kind: EntityKind) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let query = self.list(kind).query();
        let title = format!("Search {}", kind.noun());
        let block = Block::default().borders(Borders::ALL).title(title);
        let paragraph = Paragraph::new(Span::raw(format!("Search: {query}")))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

/// Last line of a modal form: the error if there is one, otherwise the keys.
fn form_hint(error: Option<&str>) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            "Enter to save • Tab to switch • Esc to cancel",
            Style::default().fg(Color::Gray),
        )),
    }
}

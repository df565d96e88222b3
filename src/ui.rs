use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::{Mutex, RwLock};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

use crate::actions::basket::add_to_basket;
use crate::actions::items::PendingItemAction;
use crate::actions::thumbnails::ThumbnailRegistry;
use crate::actions::toolbar::{open_script_window, ScriptWindow, ToolbarAction, ToolbarDropdowns};
use crate::actions::{ActionError, ActivityNotifier, AnnotationPanel, BasketCounter, Dialogs};
use crate::client::Transport;
use crate::components::Tooltip;
use crate::config::ClientConfig;
use crate::demo_data;
use crate::menu::MenuRenderer;
use crate::screens::browse::{self, Focus, PlateGrid};
use crate::screens::metadata::MetadataPanel;
use crate::selection::table::RowTable;
use crate::selection::tree::DataTree;
use crate::node_utils::NodeUtils;
use crate::selection::{
    CenterContainers, ClickModifiers, ListenerId, SelectedObject, SelectionListener,
    SelectionStore, SelectionTracker,
};
use crate::statusbar::StatusBarRenderer;

/// Alerts waiting to be shown, oldest first.
#[derive(Default)]
pub struct AlertQueue {
    pending: Mutex<VecDeque<String>>,
}

impl AlertQueue {
    pub fn front(&self) -> Option<String> {
        self.pending.lock().front().cloned()
    }

    pub fn dismiss(&self) {
        self.pending.lock().pop_front();
    }
}

impl Dialogs for AlertQueue {
    fn alert(&self, message: &str) {
        self.pending.lock().push_back(message.to_string());
    }
}

/// Counts activity refresh requests; the activities window reads it.
#[derive(Default)]
pub struct ActivityRefresh {
    requests: AtomicUsize,
}

impl ActivityNotifier for ActivityRefresh {
    fn refresh_activities(&self) {
        let n = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        log::info!("activities: refresh requested ({n})");
    }
}

/// Logs every delivered selection change.
fn selection_trace() -> Arc<dyn SelectionListener> {
    Arc::new(|objects: &[SelectedObject], force: bool| {
        let ids: Vec<&str> = objects.iter().map(|o| o.id.as_str()).collect();
        log::info!("selection: [{}]{}", ids.join(", "), if force { " (forced)" } else { "" });
    })
}

enum Modal {
    Confirm(PendingItemAction),
    ShareInput(Input),
    FilesetInput(Input),
    Script(ScriptWindow),
}

#[derive(Default, Clone, Copy)]
struct PanelLayout {
    tree: Rect,
    table: Rect,
    plate: Rect,
    viewport: Rect,
}

pub struct App {
    config: ClientConfig,
    transport: Transport,
    store: Arc<SelectionStore>,
    tracker: SelectionTracker,
    tree: Arc<RwLock<DataTree>>,
    center: CenterContainers,
    table: RowTable,
    plate: PlateGrid,
    annotations: AnnotationPanel,
    thumbnails: ThumbnailRegistry,
    basket: BasketCounter,
    metadata: Arc<MetadataPanel>,
    selection_trace: Option<ListenerId>,
    alerts: AlertQueue,
    activities: ActivityRefresh,
    modal: Option<Modal>,
    tooltip: Option<Tooltip>,
    focus: Focus,
    layout: PanelLayout,
    menu_renderer: MenuRenderer,
    statusbar_renderer: StatusBarRenderer,
    logger_widget_state: TuiWidgetState,
    should_quit: bool,
}

impl App {
    pub fn new(config: ClientConfig, transport: Transport) -> Self {
        let store = Arc::new(SelectionStore::new());
        let tracker =
            SelectionTracker::new(Arc::clone(&store), config.debounce(), config.multi_key());

        let metadata = Arc::new(MetadataPanel::new());
        store.subscribe(metadata.clone());
        let selection_trace = Some(store.subscribe(selection_trace()));

        let statusbar_renderer = StatusBarRenderer::new(transport.describe());
        log::info!("app: multi-select key is {:?}", tracker.multi_key());

        Self {
            transport,
            store,
            tracker,
            tree: Arc::new(RwLock::new(DataTree::new(demo_data::demo_tree()))),
            center: CenterContainers::default(),
            table: RowTable::new(demo_data::demo_table()),
            plate: PlateGrid {
                wells: demo_data::demo_wells(),
                columns: demo_data::DEMO_PLATE_COLUMNS,
                cursor: 0,
                selected: Vec::new(),
                field: 0,
                plate_class: demo_data::DEMO_PLATE_CLASS.to_string(),
            },
            annotations: AnnotationPanel::new(demo_data::demo_annotations()),
            thumbnails: ThumbnailRegistry::new(demo_data::demo_thumbnails()),
            basket: BasketCounter::default(),
            metadata,
            selection_trace,
            alerts: AlertQueue::default(),
            activities: ActivityRefresh::default(),
            modal: None,
            tooltip: None,
            focus: Focus::Tree,
            layout: PanelLayout::default(),
            menu_renderer: MenuRenderer::new(ToolbarDropdowns::init(demo_data::demo_toolbar())),
            statusbar_renderer,
            logger_widget_state: TuiWidgetState::new(),
            should_quit: false,
            config,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        enable_raw_mode()?;
        execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|f| self.ui(f))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse).await,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.on_tick();
                last_tick = Instant::now();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn on_tick(&mut self) {
        self.statusbar_renderer.set_selected_count(self.store.len());
        self.statusbar_renderer.set_focus(self.focus);
        self.menu_renderer.basket_total = self.basket.total();
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if self.alerts.front().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alerts.dismiss();
            }
            return;
        }
        if self.modal.is_some() {
            self.handle_modal_key(key).await;
            return;
        }
        if self.menu_renderer.is_open() && key.code == KeyCode::Esc {
            self.menu_renderer.close_menu();
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::F(2) => {
                self.menu_renderer.handle_menu_click(2);
                return;
            }
            KeyCode::Char('X') => {
                self.tracker.clear_selected(true);
                return;
            }
            KeyCode::Char('L') => {
                self.toggle_selection_trace();
                return;
            }
            KeyCode::PageUp => {
                self.logger_widget_state.transition(TuiWidgetEvent::PrevPageKey);
                return;
            }
            KeyCode::PageDown => {
                self.logger_widget_state.transition(TuiWidgetEvent::NextPageKey);
                return;
            }
            KeyCode::End => {
                self.logger_widget_state.transition(TuiWidgetEvent::EscapeKey);
                return;
            }
            _ => {}
        }

        let handled = match self.focus {
            Focus::Tree => self.handle_tree_key(key),
            Focus::Table => self.handle_table_key(key),
            Focus::Plate => self.handle_plate_key(key),
            Focus::Annotations => self.handle_annotation_key(key),
        };
        if handled {
            return;
        }

        if let KeyCode::Char(c) = key.code {
            if let Some(action) = self.menu_renderer.toolbar.find_hotkey(c) {
                self.perform_action(action).await;
            }
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.tree.write().move_cursor(-1),
            KeyCode::Down => self.tree.write().move_cursor(1),
            KeyCode::Char(' ') => {
                {
                    let mut tree = self.tree.write();
                    let cursor = tree.cursor;
                    tree.toggle(cursor);
                }
                self.tracker.tree_selection_changed(self.tree.clone());
            }
            KeyCode::Enter => {
                {
                    let mut tree = self.tree.write();
                    let cursor = tree.cursor;
                    tree.select_only(cursor);
                }
                self.show_current_container();
                self.tracker.tree_selection_changed(self.tree.clone());
            }
            KeyCode::Esc => {
                self.tree.write().deselect_all();
                self.tracker.tree_selection_changed(self.tree.clone());
            }
            KeyCode::Char('n') => self.page_center(1, "icon"),
            KeyCode::Char('p') => self.page_center(-1, "icon"),
            _ => return false,
        }
        true
    }

    /// A container node opened in the tree fills the center panel.
    fn show_current_container(&mut self) {
        let id = self
            .tree
            .read()
            .current()
            .filter(|node| node.has_children)
            .and_then(|node| node.id.clone());
        if let Some(id) = id {
            self.center = CenterContainers::showing(&id);
        }
    }

    fn page_center(&mut self, delta: isize, view: &str) {
        let Some((parent_id, _)) = self
            .center
            .icon_rel
            .as_deref()
            .and_then(NodeUtils::split_table_id)
        else {
            self.statusbar_renderer
                .set_status_message("Open a container to page through it".to_string());
            return;
        };
        let current = {
            let tree = self.tree.read();
            tree.position(&parent_id)
                .and_then(|i| tree.nodes[i].page)
                .unwrap_or(1)
        };
        let page = (current as isize + delta).max(1) as usize;
        if self
            .tracker
            .do_pagination(self.tree.clone(), &self.center, view, page)
        {
            self.statusbar_renderer
                .set_status_message(format!("{parent_id}: page {page}"));
        }
    }

    fn toggle_selection_trace(&mut self) {
        match self.selection_trace.take() {
            Some(id) => {
                self.store.unsubscribe(id);
                self.statusbar_renderer
                    .set_status_message("Selection trace off".to_string());
            }
            None => {
                self.selection_trace = Some(self.store.subscribe(selection_trace()));
                self.statusbar_renderer
                    .set_status_message("Selection trace on".to_string());
            }
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> bool {
        let multi = ClickModifiers::multi(self.tracker.multi_key());
        let cursor = self.table.cursor;
        match key.code {
            KeyCode::Up => self.table.move_cursor(-1),
            KeyCode::Down => self.table.move_cursor(1),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.tracker
                    .handle_table_click(&mut self.table, cursor, ClickModifiers::shift())
            }
            KeyCode::Enter => {
                self.tracker
                    .handle_table_click(&mut self.table, cursor, ClickModifiers::plain())
            }
            KeyCode::Char('e') => {
                self.tracker
                    .handle_table_click(&mut self.table, cursor, ClickModifiers::shift())
            }
            KeyCode::Char(' ') => self.tracker.handle_table_click(&mut self.table, cursor, multi),
            KeyCode::Char('n') => self.page_center(1, "table"),
            KeyCode::Char('p') => self.page_center(-1, "table"),
            _ => return false,
        }
        true
    }

    fn handle_plate_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.plate.move_cursor(0, -1),
            KeyCode::Down => self.plate.move_cursor(0, 1),
            KeyCode::Left => self.plate.move_cursor(-1, 0),
            KeyCode::Right => self.plate.move_cursor(1, 0),
            KeyCode::Char(' ') => {
                self.plate.toggle_cursor();
                self.publish_wells();
            }
            KeyCode::Char('[') => self.change_field(-1),
            KeyCode::Char(']') => self.change_field(1),
            _ => return false,
        }
        true
    }

    fn publish_wells(&self) {
        self.tracker.well_selection_changed(
            &self.plate.selected_wells(),
            self.plate.field,
            &self.plate.plate_class,
        );
    }

    fn change_field(&mut self, delta: isize) {
        self.plate.field = (self.plate.field as isize + delta).max(0) as usize;
        if self.plate.selected.is_empty() {
            self.tracker
                .field_selection_changed(&*self.tree, self.plate.field);
        } else {
            self.publish_wells();
        }
    }

    fn handle_annotation_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.annotations.move_cursor(-1),
            KeyCode::Down => self.annotations.move_cursor(1),
            _ => return false,
        }
        true
    }

    async fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match modal {
            Modal::Confirm(action) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.run_item_action(action).await,
                KeyCode::Char('n') | KeyCode::Esc => {
                    log::debug!("items: {} cancelled", action.element_id());
                }
                _ => self.modal = Some(Modal::Confirm(action)),
            },
            Modal::ShareInput(mut input) => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    let value = input.value().trim().to_string();
                    if value.is_empty() {
                        return;
                    }
                    let share_id = if value.starts_with("share-") {
                        value
                    } else {
                        format!("share-{value}")
                    };
                    self.tracker.share_selection_changed(&share_id);
                }
                _ => {
                    input.handle_event(&Event::Key(key));
                    self.modal = Some(Modal::ShareInput(input));
                }
            },
            Modal::FilesetInput(mut input) => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    let fileset = input.value().trim().to_string();
                    self.select_fileset(&fileset);
                }
                _ => {
                    input.handle_event(&Event::Key(key));
                    self.modal = Some(Modal::FilesetInput(input));
                }
            },
            Modal::Script(_) => {}
        }
    }

    fn select_fileset(&mut self, fileset: &str) {
        if fileset.is_empty() {
            return;
        }
        let count = self.tracker.select_fileset_images(self.tree.clone(), fileset);
        self.statusbar_renderer
            .set_status_message(format!("Fileset {fileset}: {count} image(s) selected"));
    }

    async fn perform_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::AddToBasket => {
                let ids: Vec<String> = self.store.current().into_iter().map(|o| o.id).collect();
                let result = add_to_basket(
                    &self.transport,
                    &self.alerts,
                    &mut self.basket,
                    &self.config.basket_url,
                    ids.as_slice(),
                )
                .await;
                if let Err(e) = result {
                    log::error!("basket: request failed: {e:#}");
                    self.alerts.alert(&format!("Basket update failed: {e}"));
                }
            }
            ToolbarAction::RefreshThumbnails => {
                let current = self.store.current();
                let image_id = match current.as_slice() {
                    [only] if only.object_type() == "image" => only.object_id(),
                    _ => None,
                };
                let n = self.thumbnails.refresh_now(image_id);
                self.statusbar_renderer
                    .set_status_message(format!("Refreshed {n} thumbnail(s)"));
            }
            ToolbarAction::ClearSelection => self.tracker.clear_selected(false),
            ToolbarAction::RemoveAnnotation => self.prepare_item_action(false),
            ToolbarAction::DeleteAnnotation => self.prepare_item_action(true),
            ToolbarAction::SelectFileset => {
                let fileset = self.tree.read().current().and_then(|n| n.fileset.clone());
                match fileset {
                    Some(fileset) => self.select_fileset(&fileset),
                    None => self.modal = Some(Modal::FilesetInput(Input::default())),
                }
            }
            ToolbarAction::EditShare => {
                let preset = self
                    .tree
                    .read()
                    .current()
                    .filter(|n| n.is_share())
                    .and_then(|n| n.id.clone())
                    .unwrap_or_default();
                self.modal = Some(Modal::ShareInput(Input::default().with_value(preset)));
            }
            ToolbarAction::RunFigureScript(script) => {
                self.modal = Some(Modal::Script(open_script_window(&script)));
            }
            ToolbarAction::Quit => self.should_quit = true,
        }
    }

    fn prepare_item_action(&mut self, delete: bool) {
        let Some(item) = self.annotations.focused().cloned() else {
            self.alerts.alert("Please select an annotation first.");
            return;
        };
        let template = if delete {
            &self.config.delete_url
        } else {
            &self.config.remove_url
        };
        let Some(url) = ClientConfig::item_url(template, &item.element_id) else {
            log::debug!("items: cannot build URL for '{}'", item.element_id);
            return;
        };

        let pending = if delete {
            PendingItemAction::delete(&item.element_id, &url)
        } else {
            let displayed = self.metadata.displayed();
            let Some(parent) = displayed.first() else {
                self.alerts.alert(&ActionError::NothingSelected.to_string());
                return;
            };
            PendingItemAction::remove(&item.element_id, &url, &parent.id, parent.index)
        };
        if let Some(pending) = pending {
            self.modal = Some(Modal::Confirm(pending));
        }
    }

    async fn run_item_action(&mut self, action: PendingItemAction) {
        let result = action
            .execute(
                &self.transport,
                &self.alerts,
                &self.activities,
                &mut self.annotations,
            )
            .await;
        if let Err(e) = result {
            log::error!("items: request failed: {e:#}");
            self.alerts.alert(&format!("Request failed: {e}"));
        }
    }

    async fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.modal.is_some() || self.alerts.front().is_some() {
                    return;
                }
                if mouse.row == 0 {
                    self.menu_renderer.handle_menu_click(mouse.column);
                    return;
                }
                if self.menu_renderer.is_open() {
                    if let Some(action) = self
                        .menu_renderer
                        .handle_dropdown_click(mouse.column, mouse.row)
                    {
                        self.perform_action(action).await;
                    }
                    return;
                }
                self.handle_panel_click(mouse);
            }
            MouseEventKind::Moved => {
                self.menu_renderer.handle_mouse_move(mouse.column, mouse.row);
                self.update_tooltip(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    fn handle_panel_click(&mut self, mouse: MouseEvent) {
        let position = (mouse.column, mouse.row).into();
        let modifiers = ClickModifiers {
            shift: mouse.modifiers.contains(KeyModifiers::SHIFT),
            ctrl: mouse.modifiers.contains(KeyModifiers::CONTROL),
            meta: mouse.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        };

        if self.layout.table.contains(position) {
            self.focus = Focus::Table;
            if let Some(index) = browse::table_row_at(self.layout.table, mouse.row, 0) {
                self.tracker
                    .handle_table_click(&mut self.table, index, modifiers);
            }
        } else if self.layout.tree.contains(position) {
            self.focus = Focus::Tree;
            let Some(index) = self.tree_row_at(mouse.row) else {
                return;
            };
            {
                let mut tree = self.tree.write();
                tree.cursor = index;
                if modifiers.is_multi(self.tracker.multi_key()) {
                    tree.toggle(index);
                } else {
                    tree.select_only(index);
                }
            }
            self.show_current_container();
            self.tracker.tree_selection_changed(self.tree.clone());
        } else if self.layout.plate.contains(position) {
            self.focus = Focus::Plate;
        } else {
            self.focus = Focus::Annotations;
        }
    }

    fn tree_row_at(&self, row: u16) -> Option<usize> {
        let area = self.layout.tree;
        if row <= area.y || row >= area.y + area.height.saturating_sub(1) {
            return None;
        }
        let tree = self.tree.read();
        let visible_height = area.height.saturating_sub(2) as usize;
        let start = tree.cursor.saturating_sub(visible_height.saturating_sub(1));
        let index = start + (row - area.y - 1) as usize;
        (index < tree.nodes.len()).then_some(index)
    }

    fn update_tooltip(&mut self, column: u16, row: u16) {
        if !self.layout.tree.contains((column, row).into()) {
            self.tooltip = None;
            return;
        }
        let Some(index) = self.tree_row_at(row) else {
            self.tooltip = None;
            return;
        };
        let html = demo_data::tooltip_html(&self.tree.read().nodes[index]);
        let mut tooltip = Tooltip::init(&html, self.config.tooltip.top, self.config.tooltip.left);
        tooltip.track_to(column, row);
        self.tooltip = Some(tooltip);
    }

    fn ui(&mut self, f: &mut Frame) {
        let size = f.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Toolbar
                Constraint::Min(0),    // Panels
                Constraint::Length(7), // Log
                Constraint::Length(1), // Status bar
            ])
            .split(size);

        self.menu_renderer.render_menu_bar(f, chunks[0]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(32),
                Constraint::Percentage(38),
                Constraint::Percentage(30),
            ])
            .split(chunks[1]);
        let center = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(panels[1]);

        self.layout = PanelLayout {
            tree: panels[0],
            table: center[0],
            plate: center[1],
            viewport: size,
        };

        browse::render_tree(f, panels[0], &self.tree.read(), self.focus == Focus::Tree);
        browse::render_table(f, center[0], &self.table, self.focus == Focus::Table);
        browse::render_plate(f, center[1], &self.plate, self.focus == Focus::Plate);
        self.metadata.render(
            f,
            panels[2],
            &self.annotations,
            self.focus == Focus::Annotations,
        );

        let logger_widget = TuiLoggerWidget::default()
            .block(Block::default().title("Log").borders(Borders::ALL))
            .output_timestamp(Some("%H:%M:%S".to_string()))
            .output_level(Some(TuiLoggerLevelOutput::Long))
            .output_target(false)
            .output_file(false)
            .output_line(false)
            .output_separator(' ')
            .style_info(Style::default().fg(Color::White))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_error(Style::default().fg(Color::Red))
            .style_debug(Style::default().fg(Color::DarkGray))
            .style_trace(Style::default().fg(Color::Gray))
            .state(&self.logger_widget_state);
        f.render_widget(logger_widget, chunks[2]);

        self.statusbar_renderer.render_status_bar(f, chunks[3]);

        if let Some(tooltip) = &self.tooltip {
            tooltip.render(f, self.layout.viewport);
        }
        if let Some(modal) = &self.modal {
            self.render_modal(f, modal, size);
        }
        if let Some(message) = self.alerts.front() {
            render_box(f, size, "Alert", &message, "Enter - OK", Color::Red);
        }

        // Dropdowns go last so they sit on top.
        self.menu_renderer.render_dropdown_menu(f);
    }

    fn render_modal(&self, f: &mut Frame, modal: &Modal, size: Rect) {
        match modal {
            Modal::Confirm(action) => {
                render_box(f, size, "Confirm", &action.prompt(), "y - OK | n - Cancel", Color::Yellow)
            }
            Modal::ShareInput(input) => render_box(
                f,
                size,
                "Edit share",
                &format!("Share id: {}", input.value()),
                "Enter - apply | Esc - cancel",
                Color::Cyan,
            ),
            Modal::FilesetInput(input) => render_box(
                f,
                size,
                "Select fileset",
                &format!("Fileset id: {}", input.value()),
                "Enter - select | Esc - cancel",
                Color::Cyan,
            ),
            Modal::Script(window) => render_box(
                f,
                size,
                &format!("Script: {}", window.script),
                &format!(
                    "Launched '{}' in a {}x{} window.",
                    window.script, window.width, window.height
                ),
                "any key - close",
                Color::Green,
            ),
        }
    }
}

fn render_box(f: &mut Frame, size: Rect, title: &str, message: &str, help: &str, color: Color) {
    let width = 50.min(size.width);
    let height = 7.min(size.height);
    let area = Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + (size.height - height) / 2,
        width,
        height,
    };
    let text = format!("{message}\n\n{help}");
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

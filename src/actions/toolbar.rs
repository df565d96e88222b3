/// Default size of the window a figure script opens in.
pub const SCRIPT_WINDOW_SIZE: (u16, u16) = (800, 600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    AddToBasket,
    RefreshThumbnails,
    ClearSelection,
    RemoveAnnotation,
    DeleteAnnotation,
    SelectFileset,
    EditShare,
    RunFigureScript(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownItem {
    pub label: String,
    pub hotkey: Option<char>,
    pub action: ToolbarAction,
    pub disabled: bool,
}

impl DropdownItem {
    pub fn new(label: &str, action: ToolbarAction) -> Self {
        Self {
            label: label.to_string(),
            hotkey: None,
            action,
            disabled: false,
        }
    }

    pub fn with_hotkey(mut self, key: char) -> Self {
        self.hotkey = Some(key);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub name: String,
    pub items: Vec<DropdownItem>,
    pub visible: bool,
}

impl Dropdown {
    pub fn new(name: &str, items: Vec<DropdownItem>) -> Self {
        Self {
            name: name.to_string(),
            items,
            visible: false,
        }
    }
}

/// A script launched in its own window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptWindow {
    pub script: String,
    pub width: u16,
    pub height: u16,
}

/// Toolbar buttons, each with a dropdown list. At most one list is shown.
#[derive(Debug, Clone, Default)]
pub struct ToolbarDropdowns {
    pub dropdowns: Vec<Dropdown>,
}

impl ToolbarDropdowns {
    /// Every list starts hidden.
    pub fn init(dropdowns: Vec<Dropdown>) -> Self {
        let mut toolbar = Self { dropdowns };
        toolbar.hide_all();
        toolbar
    }

    pub fn hide_all(&mut self) {
        for dropdown in self.dropdowns.iter_mut() {
            dropdown.visible = false;
        }
    }

    /// Button click: hide the others, show this one.
    pub fn click_button(&mut self, index: usize) {
        if index >= self.dropdowns.len() {
            return;
        }
        self.hide_all();
        self.dropdowns[index].visible = true;
    }

    /// Pointer left the list.
    pub fn hover_out(&mut self, index: usize) {
        if let Some(dropdown) = self.dropdowns.get_mut(index) {
            dropdown.visible = false;
        }
    }

    pub fn visible(&self) -> Option<usize> {
        self.dropdowns.iter().position(|d| d.visible)
    }

    /// Pick an entry of a list. Disabled entries do nothing; any other entry
    /// closes the list and returns its action.
    pub fn activate(&mut self, dropdown: usize, item: usize) -> Option<ToolbarAction> {
        let entry = self.dropdowns.get(dropdown)?.items.get(item)?;
        if entry.disabled {
            log::debug!("toolbar: '{}' is disabled", entry.label);
            return None;
        }
        let action = entry.action.clone();
        self.hide_all();
        Some(action)
    }

    pub fn find_hotkey(&self, key: char) -> Option<ToolbarAction> {
        self.dropdowns
            .iter()
            .flat_map(|d| d.items.iter())
            .find(|i| i.hotkey == Some(key) && !i.disabled)
            .map(|i| i.action.clone())
    }
}

pub fn open_script_window(script: &str) -> ScriptWindow {
    let (width, height) = SCRIPT_WINDOW_SIZE;
    log::info!("toolbar: opening script '{script}' ({width}x{height})");
    ScriptWindow {
        script: script.to_string(),
        width,
        height,
    }
}

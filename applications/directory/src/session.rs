//! Interactive browsing session.
//!
//! A session owns an address bar, the filter store and the page number, and
//! renders whatever the current location points at. Commands are read one
//! per line; see [`HELP`].

use crate::error::{AppError, Result};
use crate::routes::{Route, USERS_PATH};
use crate::views::{
    render_layout, render_not_found, Chrome, DetailState, DetailView, FilterForm, ListState,
    ListView,
};
use directory_core::{
    page_count, FilterUpdate, Gender, PaginationParams, Role, UserFilters, USERS_PER_PAGE,
};
use directory_query::{AddressBar, FilterStore, MemoryAddressBar, UserQueries};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

pub const HELP: &str = "\
Commands:
  email <text>                    search by email (empty clears)
  gender <male|female|->          filter by gender
  role <admin|moderator|user|->   filter by role
  clear                           clear all filters
  page <n> | next | prev          change page
  open <id|path>                  open a user or a location
  back                            go back
  show                            render the current page again
  help                            show this help
  quit                            leave";

const PROMPT: &str = "userdir> ";

/// One line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Email(String),
    Gender(Option<Gender>),
    Role(Option<Role>),
    Clear,
    Page(u32),
    Next,
    Prev,
    Open(String),
    Back,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "" | "show" | "s" => Ok(Self::Show),
            "email" | "e" => Ok(Self::Email(arg.to_string())),
            "gender" | "g" => optional(arg)
                .map(str::parse::<Gender>)
                .transpose()
                .map(Self::Gender)
                .map_err(|e| AppError::Command(e.to_string())),
            "role" | "r" => optional(arg)
                .map(str::parse::<Role>)
                .transpose()
                .map(Self::Role)
                .map_err(|e| AppError::Command(e.to_string())),
            "clear" | "c" => Ok(Self::Clear),
            "page" => arg
                .parse::<u32>()
                .ok()
                .filter(|page| *page >= 1)
                .map(Self::Page)
                .ok_or_else(|| AppError::Command(format!("Invalid page number: {:?}", arg))),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "open" | "o" if !arg.is_empty() => Ok(Self::Open(arg.to_string())),
            "open" | "o" => Err(AppError::Command("open needs a user id or a path".into())),
            "back" | "b" => Ok(Self::Back),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(AppError::Command(format!(
                "Unknown command: {}. Type `help` for a list of commands.",
                other
            ))),
        }
    }
}

/// `-` and an empty argument both mean unset
fn optional(arg: &str) -> Option<&str> {
    match arg {
        "" | "-" => None,
        value => Some(value),
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub debounce: Duration,
    /// Mirror filters and page into the address bar
    pub sync_address: bool,
    /// Emit a loading frame before waiting on uncached data
    pub show_loading: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: directory_query::DEFAULT_DEBOUNCE,
            sync_address: true,
            show_loading: true,
        }
    }
}

/// Renders frames for the current location into `out`
pub struct Session<W: Write> {
    address: Arc<MemoryAddressBar>,
    filters: FilterStore,
    queries: UserQueries,
    options: SessionOptions,
    page: u32,
    /// Page count of the last rendered list
    pages: Option<u64>,
    out: W,
}

impl<W: Write> Session<W> {
    /// Start at `location`; `/` is redirected to the list.
    ///
    /// Must be created inside a Tokio runtime.
    pub fn new(queries: UserQueries, location: &str, options: SessionOptions, out: W) -> Self {
        let route = Route::parse(location);
        let route = route.redirect().unwrap_or(route);
        let address = Arc::new(MemoryAddressBar::new(route.to_string()));

        let (filters, page) = match &route {
            Route::Users { filters, page } => (filters.clone(), *page),
            _ => (UserFilters::default(), 1),
        };

        let store = if options.sync_address {
            let bar: Arc<dyn AddressBar> = address.clone();
            FilterStore::with_address_bar(bar, options.debounce)
        } else {
            let store = FilterStore::new(options.debounce);
            store.set_filters(filters);
            store
        };

        Self {
            address,
            filters: store,
            queries,
            options,
            page,
            pages: None,
            out,
        }
    }

    /// Current location
    pub fn location(&self) -> String {
        self.address.location()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Read commands from `input` until `quit` or end of input
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        info!(location = %self.location(), "Session started");
        self.render().await?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let keep_going = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await?,
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Apply `command` and render the result; `false` once the session should end
    pub async fn execute(&mut self, command: Command) -> Result<bool> {
        debug!(?command, "Executing command");
        match command {
            Command::Email(email) => self.update_filter(FilterUpdate::Email(email)),
            Command::Gender(gender) => self.update_filter(FilterUpdate::Gender(gender)),
            Command::Role(role) => self.update_filter(FilterUpdate::Role(role)),
            Command::Clear => {
                self.ensure_list();
                self.filters.clear_filters();
                self.page = 1;
                self.pages = None;
            }
            Command::Page(page) => {
                if !self.change_page(page)? {
                    return Ok(true);
                }
            }
            Command::Next => {
                if !self.change_page(self.page.saturating_add(1))? {
                    return Ok(true);
                }
            }
            Command::Prev => {
                if !self.change_page(self.page.saturating_sub(1))? {
                    return Ok(true);
                }
            }
            Command::Open(target) => self.open(&target),
            Command::Back => {
                let Some(location) = self.address.back() else {
                    writeln!(self.out, "Nothing to go back to.")?;
                    return Ok(true);
                };
                self.restore(&Route::parse(&location));
            }
            Command::Show => {}
            Command::Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        }

        self.render().await?;
        Ok(true)
    }

    /// Navigate to `target`: a bare number opens that user
    pub fn open(&mut self, target: &str) {
        let location = if !target.is_empty() && target.bytes().all(|b| b.is_ascii_digit()) {
            Route::User {
                id: target.parse().unwrap_or(0),
            }
            .to_string()
        } else if target.starts_with('/') {
            target.to_string()
        } else {
            format!("/{}", target)
        };

        let route = Route::parse(&location);
        let route = route.redirect().unwrap_or(route);
        debug!(location = %location, "Navigating");

        match &route {
            Route::Users { .. } => self.address.push(USERS_PATH),
            _ => self.address.push(location),
        }
        self.restore(&route);
    }

    /// Bring filters and page in line with `route`
    fn restore(&mut self, route: &Route) {
        if let Route::Users { filters, page } = route {
            self.filters.set_filters(filters.clone());
            self.page = *page;
            self.pages = None;
            self.sync_page();
        }
    }

    fn update_filter(&mut self, update: FilterUpdate) {
        self.ensure_list();
        self.filters.update_filter(update);
        self.page = 1;
        self.pages = None;
    }

    /// Filter commands always act on the list
    fn ensure_list(&mut self) {
        if !matches!(Route::parse(&self.location()), Route::Users { .. }) {
            self.address.push(USERS_PATH);
            self.restore(&Route::Users {
                filters: self.filters.filters(),
                page: 1,
            });
        }
    }

    /// Move to `page` if it exists; reports and returns `false` otherwise
    fn change_page(&mut self, page: u32) -> Result<bool> {
        if !matches!(Route::parse(&self.location()), Route::Users { .. }) {
            writeln!(self.out, "Paging only applies to the user list.")?;
            return Ok(false);
        }

        let last = self.pages.unwrap_or(u64::MAX).max(1);
        if page < 1 || u64::from(page) > last {
            writeln!(self.out, "Page {} is out of range (1-{}).", page, last)?;
            return Ok(false);
        }

        self.page = page;
        self.sync_page();
        Ok(true)
    }

    fn sync_page(&self) {
        if self.options.sync_address {
            let location = Route::Users {
                filters: self.filters.filters(),
                page: self.page,
            }
            .to_string();
            self.address.replace(&location);
        }
    }

    /// Render the current location
    pub async fn render(&mut self) -> Result<()> {
        let frame = match Route::parse(&self.location()) {
            Route::Root | Route::Users { .. } => self.render_list().await?,
            Route::User { id } => self.render_detail(id).await?,
            Route::NotFound { path } => {
                debug!(path = %path, "No route");
                render_layout(Chrome::List, &render_not_found())
            }
        };
        write!(self.out, "{}", frame)?;
        self.out.flush()?;
        Ok(())
    }

    async fn render_list(&mut self) -> Result<String> {
        let debounced = self.filters.settle().await;
        let raw = self.filters.filters();
        let params = PaginationParams::for_page(self.page, USERS_PER_PAGE);
        let form = FilterForm {
            filters: &raw,
            has_active: debounced.has_active_filters(),
            active_count: debounced.active_filter_count(),
        };

        if self.options.show_loading && self.queries.users_snapshot(&debounced, params).data.is_none() {
            let loading = ListView {
                form,
                page: self.page,
                limit: USERS_PER_PAGE,
                state: ListState::Loading,
            };
            write!(self.out, "{}", render_layout(Chrome::List, &loading.render()))?;
        }

        let result = self.queries.users(&debounced, params).await;
        let state = match &result {
            Ok(data) => {
                self.pages = Some(page_count(data.total, USERS_PER_PAGE));
                ListState::Loaded(data.as_ref())
            }
            Err(error) => ListState::Failed(error),
        };

        let view = ListView {
            form,
            page: self.page,
            limit: USERS_PER_PAGE,
            state,
        };
        Ok(render_layout(Chrome::List, &view.render()))
    }

    async fn render_detail(&mut self, id: u64) -> Result<String> {
        if self.options.show_loading && id != 0 && self.queries.user_snapshot(id).data.is_none() {
            let loading = DetailView {
                state: DetailState::Loading,
            };
            write!(self.out, "{}", render_layout(Chrome::Detail, &loading.render()))?;
        }

        let result = self.queries.user(id).await;
        let state = match &result {
            Ok(Some(user)) => DetailState::Loaded(user.as_ref()),
            Ok(None) => DetailState::Missing,
            Err(error) => DetailState::Failed(error),
        };
        Ok(render_layout(Chrome::Detail, &DetailView { state }.render()))
    }
}

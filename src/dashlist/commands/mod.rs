use crate::config::DashConfig;
use crate::model::Record;
use crate::pager::PageResult;

pub mod config;
pub mod create;
pub mod delete;
pub mod facets;
pub mod helpers;
pub mod list;
pub mod update;
pub mod upload;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created, updated, deleted or fetched by id
    pub records: Vec<Record>,
    /// The derived page of a list command
    pub page: Option<PageResult<Record>>,
    pub facets: Vec<String>,
    /// Where uploaded files ended up
    pub locations: Vec<String>,
    pub config: Option<DashConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn with_page(mut self, page: PageResult<Record>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_facets(mut self, facets: Vec<String>) -> Self {
        self.facets = facets;
        self
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_config(mut self, config: DashConfig) -> Self {
        self.config = Some(config);
        self
    }
}

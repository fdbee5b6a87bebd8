use crate::commands::{CmdMessage, CmdResult};
use crate::config::DashConfig;
use crate::error::Result;
use crate::filter::{FilterCriterion, RecencyWindow};
use crate::model::EntityKind;
use crate::sort::SortKey;
use crate::store::DataStore;

use super::helpers::build_controller;

const LAST_LOGIN: &str = "lastLogin";

/// Recent-login preset for user lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub filters: Vec<FilterCriterion>,
    pub activity: Option<Activity>,
    pub sort: Option<SortKey>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListQuery {
    /// All criteria to apply, presets included.
    pub fn criteria(&self, config: &DashConfig) -> Vec<FilterCriterion> {
        let mut criteria = self.filters.clone();
        if let Some(activity) = self.activity {
            let active = FilterCriterion::within(
                LAST_LOGIN,
                RecencyWindow::days(config.active_window_days),
            );
            criteria.push(match activity {
                Activity::Active => active,
                Activity::Inactive => active.negate(),
            });
        }
        criteria
    }
}

pub fn run<S: DataStore>(
    store: &S,
    config: &DashConfig,
    kind: EntityKind,
    query: ListQuery,
) -> Result<CmdResult> {
    let mut view = build_controller(config, kind)?;
    view.refresh(store)?;

    view.set_filter(query.criteria(config));
    if let Some(search) = &query.search {
        view.set_search(search.as_str());
    }
    view.set_sort(query.sort.clone());
    if let Some(size) = query.page_size {
        view.set_page_size(size)?;
    }
    if let Some(page) = query.page {
        view.set_page(page)?;
    }

    let page = view.get_view()?;
    let mut result = CmdResult::default();
    if page.total_count == 0 {
        result.add_message(CmdMessage::info(format!("No {} found.", kind)));
    } else if page.is_out_of_range() {
        result.add_message(CmdMessage::warning(format!(
            "Page {} is past the end ({} pages)",
            page.page_index, page.total_pages
        )));
    }
    Ok(result.with_page(page))
}

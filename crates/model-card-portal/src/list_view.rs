//! Browse view: filters, current page, selection

use model_card_client::{BatchReport, Error};
use model_card_common::{CardStatus, FilterState, ModelCardPage, RiskTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use crate::load::{settle, Applied, LoadGuard, LoadState, LoadTicket};
use crate::messages::Operation;
use crate::panel::Panel;

/// User interactions on the list view
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    SetSearch(String),
    SetDomain(Option<String>),
    SetRiskTier(Option<RiskTier>),
    SetStatus(Option<CardStatus>),
    ClearFilters,
    NextPage,
    PrevPage,
    GoToPage(u32),
    ToggleSelect(String),
    SelectAllVisible,
    ClearSelection,
    DismissNotice,
}

/// What the caller should do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The filter changed; fetch the page again
    Reload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListView {
    pub filter: FilterState,
    pub page: Option<ModelCardPage>,
    pub load: LoadState,
    pub selected: BTreeSet<String>,
    /// Result of the last bulk action
    pub notice: Option<String>,
    guard: LoadGuard,
}

impl ListView {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: FilterState::with_limit(page_size),
            ..Self::default()
        }
    }

    /// Pure transition: consume the state, return the next one
    pub fn reduce(mut self, action: ListAction) -> (Self, Effect) {
        let effect = self.apply(action);
        (self, effect)
    }

    pub fn apply(&mut self, action: ListAction) -> Effect {
        match action {
            ListAction::SetSearch(search) => {
                let search = Some(search.trim().to_string()).filter(|s| !s.is_empty());
                self.refilter(|f| f.set_search(search))
            }
            ListAction::SetDomain(domain) => self.refilter(|f| f.set_domain(domain)),
            ListAction::SetRiskTier(risk_tier) => self.refilter(|f| f.set_risk_tier(risk_tier)),
            ListAction::SetStatus(status) => self.refilter(|f| f.set_status(status)),
            ListAction::ClearFilters => self.refilter(FilterState::clear_filters),
            ListAction::NextPage => {
                if self.page.as_ref().is_some_and(|p| !p.has_next()) {
                    return Effect::None;
                }
                self.refilter(FilterState::next_page)
            }
            ListAction::PrevPage => self.refilter(FilterState::prev_page),
            ListAction::GoToPage(page) => self.refilter(|f| f.go_to_page(page)),
            ListAction::ToggleSelect(id) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                Effect::None
            }
            ListAction::SelectAllVisible => {
                let visible: Vec<String> = self.visible_ids().map(str::to_string).collect();
                self.selected.extend(visible);
                Effect::None
            }
            ListAction::ClearSelection => {
                self.selected.clear();
                Effect::None
            }
            ListAction::DismissNotice => {
                self.notice = None;
                Effect::None
            }
        }
    }

    fn refilter(&mut self, change: impl FnOnce(&mut FilterState)) -> Effect {
        let before = self.filter.clone();
        change(&mut self.filter);
        if self.filter == before {
            return Effect::None;
        }
        self.selected.clear();
        Effect::Reload
    }

    /// Start a fetch for the current filter
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load = LoadState::Loading;
        self.guard.begin()
    }

    /// Feed a fetch result back; stale and cancelled results are dropped
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ModelCardPage, Error>,
    ) -> Applied {
        if !self.guard.accepts(ticket) {
            return Applied::Stale;
        }

        match settle(Operation::LoadList, result, &mut self.load, self.page.is_some()) {
            Ok(page) => {
                self.page = Some(page);
                Applied::Accepted
            }
            Err(applied) => applied,
        }
    }

    /// Record a bulk result: succeeded ids leave the selection
    pub fn apply_batch<T>(&mut self, op: Operation, report: &BatchReport<T>) -> Effect {
        for id in report.succeeded() {
            self.selected.remove(id);
        }

        let summary = report.summary();
        self.notice = if summary.failed == 0 {
            None
        } else {
            warn!(
                "{} failed for {} of {} items",
                op, summary.failed, summary.total
            );
            Some(op.partial_failure_message(summary.failed, summary.total))
        };

        if summary.succeeded > 0 {
            Effect::Reload
        } else {
            Effect::None
        }
    }

    /// Ids currently selected, in sorted order
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.page
            .iter()
            .flat_map(|p| p.models.iter())
            .map(|m| m.id.as_str())
    }

    /// Stop accepting fetch results
    pub fn dispose(&mut self) {
        self.guard.dispose();
    }

    pub fn panel(&self) -> Panel<'_> {
        match (&self.load, &self.page) {
            (LoadState::Failed { message }, _) => Panel::Failed { message },
            (_, Some(page)) => Panel::CardTable {
                page,
                filter: &self.filter,
                selected: &self.selected,
                notice: self.notice.as_deref(),
            },
            (LoadState::Loading, None) => Panel::Loading,
            _ => Panel::Empty,
        }
    }
}

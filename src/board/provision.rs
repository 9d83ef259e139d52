//! board::provision
//!
//! Ordered creation of a board from a validated spec.
//!
//! # Order
//!
//! Board, then every list, then every label, then every card (each card's
//! labels and checklist immediately after the card itself). Every call is
//! awaited before the next one is issued. The first failure aborts the run;
//! entities already created stay in place.

use std::collections::HashMap;

use tracing::info;

use crate::api::resources::{self, BoardRef, NewBoard};
use crate::api::BoardApi;
use crate::ui::output::{self, Verbosity};

use super::report::ProvisionReport;
use super::spec::{BoardSpec, CardDef, ChecklistDef, LabelDef, ListDef};
use super::{ProvisionError, SpecError};

/// Name to remote id.
type IdMap = HashMap<String, String>;

/// Drives a [`BoardApi`] through one provisioning run.
pub struct Provisioner<'a> {
    api: &'a dyn BoardApi,
    default_org: Option<String>,
    verbosity: Verbosity,
}

impl<'a> Provisioner<'a> {
    pub fn new(api: &'a dyn BoardApi) -> Self {
        Self {
            api,
            default_org: None,
            verbosity: Verbosity::Normal,
        }
    }

    /// Organization used when the spec names none.
    pub fn with_default_org(mut self, org: Option<String>) -> Self {
        self.default_org = org.filter(|o| !o.is_empty());
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Provision everything `spec` describes.
    ///
    /// # Errors
    ///
    /// The first `ApiError` from the remote, or `SpecError::UnmappedLabel`
    /// if a card names a label that was never created.
    pub async fn run(&self, spec: &BoardSpec) -> Result<ProvisionReport, ProvisionError> {
        let board = self.ensure_board(spec).await?;
        let lists = self.create_lists(&board.id, &spec.lists).await?;
        let labels = self.create_labels(&board.id, &spec.labels).await?;

        let mut checklist_items = 0;
        for (index, card) in spec.cards.iter().enumerate() {
            checklist_items += self.create_card(index, card, &lists, &labels).await?;
        }

        Ok(ProvisionReport {
            board_name: spec.board.name.clone(),
            board_id: board.id,
            url: board.url,
            dry_run: self.api.is_dry_run(),
            lists: spec.lists.len(),
            labels: spec.labels.len(),
            cards: spec.cards.len(),
            checklist_items,
        })
    }

    async fn ensure_board(&self, spec: &BoardSpec) -> Result<BoardRef, ProvisionError> {
        let def = &spec.board;

        if let Some(id) = def.existing_id() {
            output::print(format!("Using existing board id: {}", id), self.verbosity);
            return Ok(BoardRef {
                id: id.to_string(),
                url: def.url.clone(),
            });
        }

        if self.api.is_dry_run() {
            output::print(
                format!("[dry-run] Would create board: {}", def.name),
                self.verbosity,
            );
        }

        let new_board = NewBoard {
            name: def.name.clone(),
            desc: def.desc.clone(),
            default_lists: def.default_lists,
            permission_level: def.permission_level().to_string(),
            organization: def
                .organization_or(self.default_org.as_deref())
                .map(str::to_string),
        };
        let board = resources::create_board(self.api, &new_board).await?;
        info!(id = %board.id, name = %def.name, "created board");
        Ok(board)
    }

    async fn create_lists(&self, board_id: &str, lists: &[ListDef]) -> Result<IdMap, ProvisionError> {
        let mut ids = IdMap::with_capacity(lists.len());
        for (index, list) in lists.iter().enumerate() {
            let pos = list.pos_param(index);
            let id = resources::create_list(self.api, board_id, &list.name, &pos).await?;
            info!(id = %id, name = %list.name, pos = %pos, "created list");
            ids.insert(list.name.clone(), id);
        }
        Ok(ids)
    }

    async fn create_labels(
        &self,
        board_id: &str,
        labels: &[LabelDef],
    ) -> Result<IdMap, ProvisionError> {
        let mut ids = IdMap::with_capacity(labels.len());
        for label in labels {
            let id = resources::create_label(self.api, board_id, &label.name, label.color.as_deref())
                .await?;
            info!(id = %id, name = %label.name, "created label");
            // Later duplicates win.
            ids.insert(label.name.clone(), id);
        }
        Ok(ids)
    }

    /// Create one card with its labels and checklist. Returns the number of
    /// checklist items added.
    async fn create_card(
        &self,
        index: usize,
        card: &CardDef,
        lists: &IdMap,
        labels: &IdMap,
    ) -> Result<usize, ProvisionError> {
        let list_id = lists.get(&card.list).ok_or_else(|| SpecError::UnknownList {
            index,
            list: card.list.clone(),
        })?;

        let card_id = resources::create_card(self.api, list_id, &card.name, &card.desc).await?;
        info!(id = %card_id, name = %card.name, "created card");

        for label in &card.labels {
            let label_id = labels.get(label).ok_or_else(|| SpecError::UnmappedLabel {
                card: card.name.clone(),
                label: label.clone(),
            })?;
            resources::attach_label(self.api, &card_id, label_id).await?;
        }

        match &card.checklist {
            Some(checklist) if !checklist.is_empty() => {
                self.create_checklist(&card_id, checklist).await
            }
            _ => Ok(0),
        }
    }

    async fn create_checklist(
        &self,
        card_id: &str,
        checklist: &ChecklistDef,
    ) -> Result<usize, ProvisionError> {
        let checklist_id =
            resources::create_checklist(self.api, card_id, checklist.display_name()).await?;
        info!(id = %checklist_id, card = %card_id, "created checklist");

        for item in &checklist.items {
            resources::add_check_item(self.api, &checklist_id, item).await?;
        }
        Ok(checklist.items.len())
    }
}

//! Navigation controller.
//!
//! The controller owns the single "current model" of a navigation view. Each
//! list selection bumps a sequence number and marks the model as loading;
//! when the fetches for that selection finish, the result is applied only if
//! no newer selection has started in the meantime. Snapshots are immutable
//! and replaced whole, so readers never observe a half-updated model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use navlist_api::{ListSource, ListSourceError};
use navlist_types::{InferredSchema, ListDescriptor, ModelStatus, NavigationModel, ROW_PAGE_LIMIT, RawRow};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{build_model, infer};

/// The model published to presentation after each completed step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelSnapshot {
    /// Sequence number of the selection this snapshot belongs to.
    pub selection: u64,
    pub list_id: Option<String>,
    /// Lists offered in the picker.
    pub lists: Vec<ListDescriptor>,
    pub schema: InferredSchema,
    pub model: NavigationModel,
    pub status: ModelStatus,
    /// Set once any applied run found a section column; keeps the model grouped.
    pub sections_seen: bool,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl ModelSnapshot {
    /// The picker entry for the current selection, if the catalog knows it.
    pub fn selected_list(&self) -> Option<&ListDescriptor> {
        let list_id = self.list_id.as_deref()?;
        self.lists.iter().find(|list| list.id == list_id)
    }
}

/// Whether a finished selection made it into the published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Applied,
    /// A newer selection started before this one finished.
    Superseded,
}

pub struct NavigationController<S> {
    source: S,
    state: watch::Sender<Arc<ModelSnapshot>>,
}

impl<S: ListSource> NavigationController<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(Arc::new(ModelSnapshot::default()));
        Self { source, state }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ModelSnapshot>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Arc<ModelSnapshot> {
        Arc::clone(&self.state.borrow())
    }

    /// Current model and its status.
    pub fn navigation_model(&self) -> (NavigationModel, ModelStatus) {
        let snapshot = self.snapshot();
        (snapshot.model.clone(), snapshot.status.clone())
    }

    /// Fetch the list catalog for the picker.
    ///
    /// On failure the catalog and the model are emptied and the status carries
    /// the error message. A failed load also supersedes any selection still in
    /// flight, so its result cannot replace the error.
    pub async fn load_catalog(&self) -> Result<Vec<ListDescriptor>, ListSourceError> {
        match self.source.fetch_catalog().await {
            Ok(lists) => {
                info!(list_count = lists.len(), "list catalog loaded");
                self.publish(|next| next.lists = lists.clone());
                Ok(lists)
            }
            Err(error) => {
                warn!(error = %error, "list catalog failed to load");
                let message = error.user_message();
                self.publish(|next| {
                    next.selection += 1;
                    next.lists.clear();
                    next.model = next.model.emptied();
                    next.status = ModelStatus::Error(message);
                });
                Err(error)
            }
        }
    }

    /// Select `list_id` and rebuild the model from its fields and rows.
    ///
    /// A blank id clears the selection.
    pub async fn select_list(&self, list_id: &str) -> SelectionOutcome {
        let list_id = list_id.trim();
        if list_id.is_empty() {
            self.clear_selection();
            return SelectionOutcome::Applied;
        }

        let selection = self.begin_selection(Some(list_id), ModelStatus::Loading);
        debug!(%list_id, selection, "selection started");
        let outcome = self.fetch_selection(list_id).await;
        self.complete_selection(selection, list_id, outcome)
    }

    /// Drop the selection; any in-flight fetch is discarded when it lands.
    pub fn clear_selection(&self) {
        let selection = self.begin_selection(None, ModelStatus::Idle);
        debug!(selection, "selection cleared");
    }

    fn begin_selection(&self, list_id: Option<&str>, status: ModelStatus) -> u64 {
        let mut selection = 0;
        self.publish(|next| {
            next.selection += 1;
            selection = next.selection;
            next.list_id = list_id.map(str::to_string);
            next.schema = InferredSchema::default();
            next.model = next.model.emptied();
            next.status = status;
            next.loaded_at = None;
        });
        selection
    }

    async fn fetch_selection(&self, list_id: &str) -> Result<(InferredSchema, Vec<RawRow>), ListSourceError> {
        let fields = self.source.fetch_fields(list_id).await?;
        let schema = infer(&fields);
        debug!(
            %list_id,
            field_count = fields.len(),
            display = ?schema.display_field.as_ref().map(|field| &field.internal_name),
            link = ?schema.link_field.as_ref().map(|field| &field.internal_name),
            section = ?schema.section_field.as_ref().map(|field| &field.internal_name),
            "schema inferred"
        );

        let mut rows = self.source.fetch_rows(list_id, &schema.select_fields()).await?;
        if rows.len() > ROW_PAGE_LIMIT {
            debug!(%list_id, row_count = rows.len(), limit = ROW_PAGE_LIMIT, "truncating rows");
            rows.truncate(ROW_PAGE_LIMIT);
        }
        Ok((schema, rows))
    }

    fn complete_selection(
        &self,
        selection: u64,
        list_id: &str,
        outcome: Result<(InferredSchema, Vec<RawRow>), ListSourceError>,
    ) -> SelectionOutcome {
        let applied = self.state.send_if_modified(|current| {
            if current.selection != selection {
                return false;
            }

            let mut next = ModelSnapshot::clone(current);
            match outcome {
                Ok((schema, rows)) => {
                    let sections_seen = next.sections_seen || schema.has_section_field();
                    next.model = build_model(&schema, &rows, sections_seen);
                    next.schema = schema;
                    next.sections_seen = sections_seen;
                    next.status = ModelStatus::Ready;
                    next.loaded_at = Some(Utc::now());
                    info!(%list_id, entry_count = next.model.entry_count(), "navigation model ready");
                }
                Err(error) => {
                    warn!(%list_id, error = %error, "navigation model failed to load");
                    next.model = next.model.emptied();
                    next.status = ModelStatus::Error(error.user_message());
                }
            }
            *current = Arc::new(next);
            true
        });

        if applied {
            SelectionOutcome::Applied
        } else {
            debug!(%list_id, selection, "discarding result of superseded selection");
            SelectionOutcome::Superseded
        }
    }

    fn publish(&self, change: impl FnOnce(&mut ModelSnapshot)) {
        self.state.send_modify(|current| {
            let mut next = ModelSnapshot::clone(current);
            change(&mut next);
            *current = Arc::new(next);
        });
    }
}

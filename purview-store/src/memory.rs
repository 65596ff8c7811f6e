// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::rc::Rc;

use purview_core::{ObjectId, RawTagRecord, Target};

use crate::traits::{MetadataStore, PublicationStore, RepositoryGraph};

/// In-memory implementation of all three collaborator interfaces.
///
/// Cloning is cheap and clones share state, so the same store can be handed
/// to the engine once per interface. Intended for tests and embedded use;
/// deployments back the traits with their own storage layer instead.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    objects: Rc<RefCell<HashMap<ObjectId, ObjectRecord>>>,
    published: Rc<RefCell<HashMap<ObjectId, HashMap<Target, bool>>>>,
}

#[derive(Debug, Default)]
struct ObjectRecord {
    tags: Vec<RawTagRecord>,
    admin_tags: HashSet<String>,
    collections: Vec<ObjectId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object with no tags or memberships yet.
    pub fn insert_object(&self, id: &ObjectId) {
        self.objects.borrow_mut().entry(id.clone()).or_default();
    }

    /// Attach a raw tag record to an object, registering it if needed.
    pub fn insert_tag(&self, id: &ObjectId, record: RawTagRecord) {
        self.objects
            .borrow_mut()
            .entry(id.clone())
            .or_default()
            .tags
            .push(record);
    }

    /// Attach an administrative tag to an object, registering it if needed.
    pub fn insert_admin_tag(&self, id: &ObjectId, admin_tag: &str) {
        self.objects
            .borrow_mut()
            .entry(id.clone())
            .or_default()
            .admin_tags
            .insert(admin_tag.to_string());
    }

    /// Record a direct membership edge `member → collection`.
    ///
    /// Only the member side is registered; a membership edge pointing at an
    /// unregistered collection models the stale-edge condition the engine
    /// has to tolerate.
    pub fn insert_membership(&self, member: &ObjectId, collection: &ObjectId) {
        self.objects
            .borrow_mut()
            .entry(member.clone())
            .or_default()
            .collections
            .push(collection.clone());
    }

    /// Record previously published disclosure state for one target.
    pub fn set_published(&self, id: &ObjectId, target: Target, release: bool) {
        self.published
            .borrow_mut()
            .entry(id.clone())
            .or_default()
            .insert(target, release);
    }
}

impl MetadataStore for MemoryStore {
    type Error = Infallible;

    async fn own_tags(&self, id: &ObjectId) -> Result<Option<Vec<RawTagRecord>>, Self::Error> {
        let objects = self.objects.borrow();
        Ok(objects.get(id).map(|record| record.tags.clone()))
    }

    async fn admin_tags(&self, id: &ObjectId) -> Result<HashSet<String>, Self::Error> {
        let objects = self.objects.borrow();
        Ok(objects
            .get(id)
            .map(|record| record.admin_tags.clone())
            .unwrap_or_default())
    }
}

impl RepositoryGraph for MemoryStore {
    type Error = Infallible;

    async fn direct_collections(&self, id: &ObjectId) -> Result<Vec<ObjectId>, Self::Error> {
        let objects = self.objects.borrow();
        Ok(objects
            .get(id)
            .map(|record| record.collections.clone())
            .unwrap_or_default())
    }
}

impl PublicationStore for MemoryStore {
    type Error = Infallible;

    async fn published_targets(&self, id: &ObjectId) -> Result<HashSet<Target>, Self::Error> {
        let published = self.published.borrow();
        Ok(published
            .get(id)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn previous_release_value(
        &self,
        id: &ObjectId,
        target: &Target,
    ) -> Result<Option<bool>, Self::Error> {
        let published = self.published.borrow();
        Ok(published
            .get(id)
            .and_then(|targets| targets.get(target))
            .copied())
    }
}

#[cfg(test)]
mod tests {
    use purview_core::{ObjectId, Target};

    use super::MemoryStore;
    use crate::test_utils::tag_record;
    use crate::traits::{MetadataStore, PublicationStore, RepositoryGraph};

    #[tokio::test]
    async fn unknown_object_has_no_metadata() {
        let store = MemoryStore::new();
        let id = ObjectId::from("pv:missing");

        assert_eq!(store.own_tags(&id).await.unwrap(), None);
        assert!(store.admin_tags(&id).await.unwrap().is_empty());
        assert!(store.direct_collections(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn registered_object_returns_seeded_state() {
        let store = MemoryStore::new();
        let item = ObjectId::from("pv:item");
        let collection = ObjectId::from("pv:collection");

        store.insert_tag(
            &item,
            tag_record("Searchworks", "self", "2024-03-01T12:00:00Z", "petucket", true),
        );
        store.insert_admin_tag(&item, "Project : Batch1");
        store.insert_membership(&item, &collection);

        assert_eq!(store.own_tags(&item).await.unwrap().unwrap().len(), 1);
        assert!(
            store
                .admin_tags(&item)
                .await
                .unwrap()
                .contains("Project : Batch1")
        );
        assert_eq!(
            store.direct_collections(&item).await.unwrap(),
            vec![collection]
        );
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        let id = ObjectId::from("pv:item");

        clone.insert_object(&id);

        assert_eq!(store.own_tags(&id).await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn publication_state_distinguishes_revoked_from_never_seen() {
        let store = MemoryStore::new();
        let id = ObjectId::from("pv:item");

        store.set_published(&id, Target::from("Searchworks"), false);

        assert_eq!(
            store
                .previous_release_value(&id, &Target::from("Searchworks"))
                .await
                .unwrap(),
            Some(false)
        );
        assert_eq!(
            store
                .previous_release_value(&id, &Target::from("Earthworks"))
                .await
                .unwrap(),
            None
        );
        assert_eq!(store.published_targets(&id).await.unwrap().len(), 1);
    }
}

//! # Object Store
//!
//! Keyed registry owning every Binary Value record of a device.
//!
//! Records are kept in instance order, so the index of an object is its rank
//! among the stored instances.

use shared_types::BACNET_MAX_INSTANCE;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::BinaryValueConfig;
use crate::domain::{BinaryValueObject, StoreError};

/// Lowest instance handed out for a wildcard create.
const FIRST_AUTO_INSTANCE: u32 = 1;

/// Ordered instance -> record map with a fixed capacity.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: BTreeMap<u32, BinaryValueObject>,
    capacity: usize,
    active_text: String,
    inactive_text: String,
}

impl ObjectStore {
    /// Create an empty store from configuration.
    pub fn new(config: &BinaryValueConfig) -> Self {
        Self {
            objects: BTreeMap::new(),
            capacity: config.max_objects,
            active_text: config.default_active_text.clone(),
            inactive_text: config.default_inactive_text.clone(),
        }
    }

    /// Lowest unused instance at or above [`FIRST_AUTO_INSTANCE`].
    fn next_free_instance(&self) -> Option<u32> {
        let mut candidate = FIRST_AUTO_INSTANCE;
        for key in self.objects.range(FIRST_AUTO_INSTANCE..).map(|(key, _)| *key) {
            if key != candidate {
                break;
            }
            candidate += 1;
        }
        (candidate < BACNET_MAX_INSTANCE).then_some(candidate)
    }

    /// Create an object.
    ///
    /// `BACNET_MAX_INSTANCE` is the wildcard: the lowest free instance is
    /// chosen. Creating an instance that already exists returns it unchanged.
    pub fn create(&mut self, instance: u32) -> Result<u32, StoreError> {
        if instance > BACNET_MAX_INSTANCE {
            return Err(StoreError::InstanceOutOfRange {
                instance,
                max: BACNET_MAX_INSTANCE,
            });
        }

        let exhausted = StoreError::CapacityExhausted {
            capacity: self.capacity,
        };
        let instance = if instance == BACNET_MAX_INSTANCE {
            self.next_free_instance().ok_or_else(|| exhausted.clone())?
        } else {
            instance
        };

        if self.objects.contains_key(&instance) {
            return Ok(instance);
        }
        if self.objects.len() >= self.capacity {
            return Err(exhausted);
        }

        self.objects.insert(
            instance,
            BinaryValueObject::with_texts(instance, &self.active_text, &self.inactive_text),
        );
        debug!(instance, count = self.objects.len(), "[bo-05] Object created");
        Ok(instance)
    }

    pub fn lookup(&self, instance: u32) -> Option<&BinaryValueObject> {
        self.objects.get(&instance)
    }

    pub fn lookup_mut(&mut self, instance: u32) -> Option<&mut BinaryValueObject> {
        self.objects.get_mut(&instance)
    }

    pub fn contains(&self, instance: u32) -> bool {
        self.objects.contains_key(&instance)
    }

    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of `instance`, or [`count`](Self::count) if it is absent.
    pub fn index_of(&self, instance: u32) -> usize {
        if self.objects.contains_key(&instance) {
            self.objects.range(..instance).count()
        } else {
            self.objects.len()
        }
    }

    /// Instance at `index`, in instance order.
    pub fn instance_at(&self, index: usize) -> Option<u32> {
        self.objects.keys().nth(index).copied()
    }

    /// All instances, in order.
    pub fn instances(&self) -> impl Iterator<Item = u32> + '_ {
        self.objects.keys().copied()
    }

    /// Remove one object. Returns `false` if it did not exist.
    pub fn delete(&mut self, instance: u32) -> bool {
        let removed = self.objects.remove(&instance).is_some();
        if removed {
            debug!(instance, "[bo-05] Object deleted");
        }
        removed
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new(&BinaryValueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{BinaryPv, Polarity};

    fn store_with_capacity(capacity: usize) -> ObjectStore {
        ObjectStore::new(&BinaryValueConfig::default().with_max_objects(capacity))
    }

    #[test]
    fn test_wildcard_allocates_lowest_free_from_one() {
        let mut store = ObjectStore::default();
        assert_eq!(store.create(BACNET_MAX_INSTANCE), Ok(1));
        assert_eq!(store.create(BACNET_MAX_INSTANCE), Ok(2));
        assert_eq!(store.create(5), Ok(5));
        assert_eq!(store.create(BACNET_MAX_INSTANCE), Ok(3));
        assert!(store.delete(1));
        assert_eq!(store.create(BACNET_MAX_INSTANCE), Ok(1));
    }

    #[test]
    fn test_wildcard_skips_instance_zero() {
        let mut store = ObjectStore::default();
        assert_eq!(store.create(0), Ok(0));
        assert_eq!(store.create(BACNET_MAX_INSTANCE), Ok(1));
    }

    #[test]
    fn test_create_existing_is_idempotent() {
        let mut store = ObjectStore::default();
        store.create(10).unwrap();
        {
            let object = store.lookup_mut(10).unwrap();
            object.set_polarity(Polarity::Reverse);
            object.set_present_value(BinaryPv::Active);
        }
        assert_eq!(store.create(10), Ok(10));
        assert_eq!(store.count(), 1);
        let object = store.lookup(10).unwrap();
        assert_eq!(object.polarity(), Polarity::Reverse);
        assert_eq!(object.present_value(), BinaryPv::Active);
    }

    #[test]
    fn test_instance_above_max_rejected() {
        let mut store = ObjectStore::default();
        assert_eq!(
            store.create(BACNET_MAX_INSTANCE + 1),
            Err(StoreError::InstanceOutOfRange {
                instance: BACNET_MAX_INSTANCE + 1,
                max: BACNET_MAX_INSTANCE
            })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_capacity_exhausted() {
        let mut store = store_with_capacity(2);
        store.create(1).unwrap();
        store.create(2).unwrap();
        assert_eq!(
            store.create(3),
            Err(StoreError::CapacityExhausted { capacity: 2 })
        );
        assert_eq!(
            store.create(BACNET_MAX_INSTANCE),
            Err(StoreError::CapacityExhausted { capacity: 2 })
        );
        // existing instance still resolves at capacity
        assert_eq!(store.create(2), Ok(2));
    }

    #[test]
    fn test_index_mapping() {
        let mut store = ObjectStore::default();
        for instance in [30, 10, 20] {
            store.create(instance).unwrap();
        }
        assert_eq!(store.count(), 3);
        assert_eq!(store.instance_at(0), Some(10));
        assert_eq!(store.instance_at(2), Some(30));
        assert_eq!(store.instance_at(3), None);
        assert_eq!(store.index_of(20), 1);
        assert_eq!(store.index_of(99), store.count());
        assert_eq!(store.instances().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut store = ObjectStore::default();
        store.clear();
        store.create(1).unwrap();
        store.create(2).unwrap();
        assert!(store.delete(1));
        assert!(!store.delete(1));
        assert!(!store.contains(1));
        store.clear();
        assert_eq!(store.count(), 0);
        store.clear();
    }

    #[test]
    fn test_new_objects_use_configured_texts() {
        let config = BinaryValueConfig {
            default_active_text: "On".to_string(),
            default_inactive_text: "Off".to_string(),
            ..BinaryValueConfig::default()
        };
        let mut store = ObjectStore::new(&config);
        store.create(1).unwrap();
        let object = store.lookup(1).unwrap();
        assert_eq!(object.active_text(), "On");
        assert_eq!(object.inactive_text(), "Off");
    }
}

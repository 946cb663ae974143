use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use crate::error::EcsError;

/// Type-map storage for world-scoped singletons that are not attached to any entity.
pub struct Elements {
    map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Elements {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert an element. Fails if one of the same type is already present.
    pub fn add<T: 'static + Send + Sync>(&mut self, value: T) -> Result<(), EcsError> {
        if self.contains::<T>() {
            return Err(EcsError::DuplicateElement(type_name::<T>()));
        }
        self.map.insert(TypeId::of::<T>(), Box::new(value));
        Ok(())
    }

    /// Insert an element, replacing any previous value of the same type.
    pub fn add_or_replace<T: 'static + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|b| b.downcast().ok())
            .map(|b| *b)
    }

    /// Get an immutable reference to an element.
    pub fn get<T: 'static + Send + Sync>(&self) -> Result<&T, EcsError> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
            .ok_or(EcsError::MissingElement(type_name::<T>()))
    }

    /// Get a mutable reference to an element.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self) -> Result<&mut T, EcsError> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|b| b.downcast_mut())
            .ok_or(EcsError::MissingElement(type_name::<T>()))
    }

    /// Remove an element, returning it.
    pub fn remove<T: 'static + Send + Sync>(&mut self) -> Result<T, EcsError> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|b| b.downcast().ok())
            .map(|b| *b)
            .ok_or(EcsError::MissingElement(type_name::<T>()))
    }

    /// Check whether an element of this type exists.
    pub fn contains<T: 'static + Send + Sync>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Elements {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let mut elements = Elements::new();
        elements.add(42u32).unwrap();
        elements.add("hello".to_string()).unwrap();
        assert_eq!(elements.get::<u32>(), Ok(&42));
        assert_eq!(elements.get::<String>(), Ok(&"hello".to_string()));
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn add_twice_fails() {
        let mut elements = Elements::new();
        elements.add(5u32).unwrap();
        assert_eq!(
            elements.add(6u32),
            Err(EcsError::DuplicateElement("u32"))
        );
        assert_eq!(elements.get::<u32>(), Ok(&5));
    }

    #[test]
    fn replace() {
        let mut elements = Elements::new();
        elements.add(5u32).unwrap();
        assert_eq!(elements.add_or_replace(6u32), Some(5));
        assert_eq!(elements.get::<u32>(), Ok(&6));
        assert_eq!(elements.add_or_replace(1.5f32), None);
    }

    #[test]
    fn missing() {
        let mut elements = Elements::new();
        assert_eq!(elements.get::<u8>(), Err(EcsError::MissingElement("u8")));
        assert!(elements.get_mut::<u8>().is_err());
        assert_eq!(elements.remove::<u8>(), Err(EcsError::MissingElement("u8")));
    }

    #[test]
    fn mutate() {
        let mut elements = Elements::new();
        elements.add(vec![1, 2, 3]).unwrap();
        elements.get_mut::<Vec<i32>>().unwrap().push(4);
        assert_eq!(elements.get::<Vec<i32>>().unwrap().len(), 4);
    }

    #[test]
    fn remove_element() {
        let mut elements = Elements::new();
        elements.add(99u32).unwrap();
        assert_eq!(elements.remove::<u32>(), Ok(99));
        assert!(!elements.contains::<u32>());
    }
}

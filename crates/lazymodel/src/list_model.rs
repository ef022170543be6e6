//! List model adapter.

use std::cell::RefCell;
use std::rc::Rc;

use lazymodel_core::{Entity, Result, SessionFinder};

use crate::model::Model;

/// View-side model over an ordered sequence of entities, delegating
/// detach/attach per element to [`Model`].
pub struct ListModel<T: Entity> {
    models: Option<Vec<Model<T>>>,
    finder: Rc<dyn SessionFinder>,
}

impl<T: Entity> ListModel<T> {
    /// Empty list model.
    #[must_use]
    pub fn new(finder: Rc<dyn SessionFinder>) -> Self {
        Self {
            models: Some(Vec::new()),
            finder,
        }
    }

    /// List model over the given entities.
    #[must_use]
    pub fn with_objects(finder: Rc<dyn SessionFinder>, objects: Vec<T>) -> Self {
        let mut model = Self::new(finder);
        for object in objects {
            model.push(object);
        }
        model
    }

    /// Append an entity.
    pub fn push(&mut self, object: T) {
        self.push_shared(Rc::new(RefCell::new(object)));
    }

    /// Append an already-shared entity.
    pub fn push_shared(&mut self, object: Rc<RefCell<T>>) {
        self.models
            .get_or_insert_with(Vec::new)
            .push(Model::from_shared(self.finder.clone(), object));
    }

    /// The contained entities, re-attached where relations were stripped.
    pub fn get(&mut self) -> Result<Option<Vec<Rc<RefCell<T>>>>> {
        let Some(models) = &mut self.models else {
            return Ok(None);
        };

        let mut objects = Vec::with_capacity(models.len());
        for model in models {
            if let Some(object) = model.get()? {
                objects.push(object);
            }
        }
        Ok(Some(objects))
    }

    /// Replace the contained entities; `None` empties the model entirely.
    pub fn set(&mut self, objects: Option<Vec<Rc<RefCell<T>>>>) {
        self.models = objects.map(|objects| {
            objects
                .into_iter()
                .map(|object| Model::from_shared(self.finder.clone(), object))
                .collect()
        });
    }

    /// Detach every contained model.
    pub fn detach(&mut self) -> Result<()> {
        if let Some(models) = &mut self.models {
            for model in models {
                model.detach()?;
            }
        }
        Ok(())
    }

    /// Number of contained entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.as_ref().map_or(0, Vec::len)
    }

    /// Whether the model holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> std::fmt::Debug for ListModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListModel").field("len", &self.len()).finish()
    }
}

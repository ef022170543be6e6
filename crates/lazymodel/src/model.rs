//! Single-entity model adapter.

use std::cell::RefCell;
use std::rc::Rc;

use lazymodel_core::{Entity, EntityRef, Error, Result, SessionFinder};
use lazymodel_detach::{helper, Attacher, Detacher, ModelCallback};

/// View-side model holding one persistent entity across request boundaries.
///
/// The model exclusively owns its root and its callback registry; the
/// injected [`SessionFinder`] is the only tie to the persistence tier. One
/// model belongs to one request-processing activity at a time.
pub struct Model<T: Entity> {
    object: Option<Rc<RefCell<T>>>,
    callback: ModelCallback,
    finder: Rc<dyn SessionFinder>,
}

impl<T: Entity> Model<T> {
    /// Model over a freshly constructed or loaded entity.
    #[must_use]
    pub fn new(finder: Rc<dyn SessionFinder>, object: T) -> Self {
        Self::from_shared(finder, Rc::new(RefCell::new(object)))
    }

    /// Model over an entity that is already shared.
    #[must_use]
    pub fn from_shared(finder: Rc<dyn SessionFinder>, object: Rc<RefCell<T>>) -> Self {
        Self {
            object: Some(object),
            callback: ModelCallback::new(),
            finder,
        }
    }

    /// Model holding nothing yet.
    #[must_use]
    pub fn empty(finder: Rc<dyn SessionFinder>) -> Self {
        Self {
            object: None,
            callback: ModelCallback::new(),
            finder,
        }
    }

    /// The root entity, re-attached if relations were stripped.
    ///
    /// The first call after a request boundary materializes every recorded
    /// relation against a fresh session and writes it back onto its owner.
    /// A missing session is fatal; any other attach failure leaves the field
    /// null, equivalent to an uninitialized association.
    pub fn get(&mut self) -> Result<Option<Rc<RefCell<T>>>> {
        self.reattach()?;
        Ok(self.object.clone())
    }

    /// Replace the root, discarding any recorded relations.
    pub fn set(&mut self, object: Option<Rc<RefCell<T>>>) {
        self.object = object;
        self.callback = ModelCallback::new();
    }

    /// Strip every lazy reference reachable from the root, recording it for
    /// re-attachment. Call before the enclosing view state is serialized.
    pub fn detach(&mut self) -> Result<()> {
        if let Some(object) = &self.object {
            let root: EntityRef = object.clone();
            Detacher::new(&mut self.callback).detach(&root)?;
        }
        Ok(())
    }

    /// The callback registry, for diagnostics.
    #[must_use]
    pub fn callback(&self) -> &ModelCallback {
        &self.callback
    }

    fn reattach(&mut self) -> Result<()> {
        if self.callback.is_empty() {
            return Ok(());
        }

        let attacher = Attacher::new(self.finder.as_ref());
        for owner in self.callback.owners() {
            let records = self.callback.properties_of(&owner).to_vec();
            for record in &records {
                match attacher.attach(&owner, record) {
                    Ok(value) => {
                        let restored = value.kind_name();
                        if let Err(error) = helper::write(&owner, record.property(), value) {
                            tracing::error!(
                                target: "lazymodel::model",
                                property = record.property(),
                                error = %error,
                                "cannot restore attached value"
                            );
                        } else {
                            tracing::debug!(
                                target: "lazymodel::model",
                                property = record.property(),
                                restored,
                                "relation restored"
                            );
                        }
                    }
                    Err(error @ Error::Session(_)) => return Err(error),
                    Err(error) => {
                        tracing::warn!(
                            target: "lazymodel::model",
                            property = record.property(),
                            error = %error,
                            "relation left unset"
                        );
                    }
                }
            }
            self.callback.clear(&owner);
        }
        Ok(())
    }
}

impl<T: Entity> std::fmt::Debug for Model<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("object", &self.object)
            .field("pending_owners", &self.callback.len())
            .finish()
    }
}

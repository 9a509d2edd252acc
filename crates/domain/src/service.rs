use log::{debug, error, info, warn};

use crate::{
    DeleteError, DocumentFormat, ExportError, ImportError, State, StateRepository, WriteError,
};

pub struct Service<R> {
    repository: R,
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable(_)) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: StateRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Load the stored state, completed with defaults.
    ///
    /// If nothing is stored or the stored document cannot be read, the
    /// default state is returned.
    pub fn load(&self) -> State {
        match self.repository.read_state() {
            Ok(Some(stored)) => State::merge(stored),
            Ok(None) => {
                debug!("no stored state, starting with defaults");
                State::bootstrap()
            }
            Err(err) => {
                warn!("failed to read state, starting with defaults: {err}");
                State::bootstrap()
            }
        }
    }

    pub fn save(&self, state: &State) -> Result<(), WriteError> {
        log_on_error!(self.repository.write_state(state), WriteError, "write", "state")
    }

    /// Discard the stored state and store the default state instead.
    pub fn reset(&self) -> Result<State, WriteError> {
        log_on_error!(
            self.repository.delete_state(),
            DeleteError,
            "delete",
            "state"
        )?;
        let state = State::bootstrap();
        self.save(&state)?;
        info!("reset state to defaults");
        Ok(state)
    }
}

impl<R: StateRepository + DocumentFormat> Service<R> {
    /// Replace the stored state by an imported document.
    ///
    /// The document is completed in the same way as a loaded one. On error the
    /// stored state is left unchanged.
    pub fn import(&self, text: &str) -> Result<State, ImportError> {
        let stored = self
            .repository
            .parse_document(text)
            .inspect_err(|err| warn!("rejected import: {err}"))?;
        let state = State::merge(stored);
        self.save(&state)?;
        info!("imported state with {} workouts", state.workouts.len());
        Ok(state)
    }

    pub fn export(&self, state: &State) -> Result<String, ExportError> {
        self.repository
            .format_document(state)
            .inspect_err(|err| error!("failed to export state: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{DayID, Program, ReadError, StorageError, StoredState};

    #[derive(Default)]
    struct FakeRepository {
        stored: RefCell<Option<State>>,
        unreadable: bool,
        read_only: bool,
    }

    impl StateRepository for FakeRepository {
        fn read_state(&self) -> Result<Option<StoredState>, ReadError> {
            if self.unreadable {
                return Err(ReadError::Malformed("expected value".to_string()));
            }
            Ok(self.stored.borrow().clone().map(StoredState::from))
        }

        fn write_state(&self, state: &State) -> Result<(), WriteError> {
            if self.read_only {
                return Err(StorageError::Unavailable("quota exceeded".to_string()).into());
            }
            *self.stored.borrow_mut() = Some(state.clone());
            Ok(())
        }

        fn delete_state(&self) -> Result<(), DeleteError> {
            *self.stored.borrow_mut() = None;
            Ok(())
        }
    }

    impl DocumentFormat for FakeRepository {
        fn parse_document(&self, text: &str) -> Result<StoredState, ImportError> {
            match text {
                "empty" => Ok(StoredState::default()),
                "day 3" => Ok(StoredState {
                    active_day_id: Some(DayID::new("d3")),
                    ..StoredState::default()
                }),
                _ => Err(ImportError::Invalid(text.to_string())),
            }
        }

        fn format_document(&self, state: &State) -> Result<String, ExportError> {
            Ok(state.program.name.clone())
        }
    }

    fn modified_state() -> State {
        let mut state = State::bootstrap();
        state.select_day(&DayID::new("d2"));
        state
    }

    #[test]
    fn test_load_without_stored_state() {
        let service = Service::new(FakeRepository::default());
        assert_eq!(service.load(), State::bootstrap());
    }

    #[test]
    fn test_load_unreadable_state() {
        let service = Service::new(FakeRepository {
            unreadable: true,
            ..FakeRepository::default()
        });
        assert_eq!(service.load(), State::bootstrap());
    }

    #[test]
    fn test_load_stored_state() {
        let service = Service::new(FakeRepository {
            stored: RefCell::new(Some(State {
                program: Program {
                    days: vec![],
                    ..modified_state().program
                },
                ..modified_state()
            })),
            ..FakeRepository::default()
        });
        let state = service.load();
        assert_eq!(state.program, State::bootstrap().program);
        assert_eq!(state.active_day_id, DayID::new("d2"));
    }

    #[test]
    fn test_save_and_reset() {
        let service = Service::new(FakeRepository::default());
        service.save(&modified_state()).unwrap();
        assert_eq!(service.load(), modified_state());
        assert_eq!(service.reset().unwrap(), State::bootstrap());
        assert_eq!(service.load(), State::bootstrap());
    }

    #[test]
    fn test_save_failure() {
        let service = Service::new(FakeRepository {
            read_only: true,
            ..FakeRepository::default()
        });
        assert!(matches!(
            service.save(&State::bootstrap()),
            Err(WriteError::Storage(StorageError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_import() {
        let service = Service::new(FakeRepository::default());
        let state = service.import("day 3").unwrap();
        assert_eq!(state.active_day_id, DayID::new("d3"));
        assert_eq!(service.load(), state);
        assert_eq!(service.import("empty").unwrap(), State::bootstrap());
    }

    #[test]
    fn test_import_invalid_keeps_stored_state() {
        let service = Service::new(FakeRepository::default());
        service.save(&modified_state()).unwrap();
        assert!(matches!(
            service.import("{"),
            Err(ImportError::Invalid(_))
        ));
        assert_eq!(service.load(), modified_state());
    }

    #[test]
    fn test_export() {
        let service = Service::new(FakeRepository::default());
        assert_eq!(
            service.export(&State::bootstrap()).unwrap(),
            "Lean 5-Day (EoS-friendly)"
        );
    }
}

//! Boot sequencing: splash → globe init → ready.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{error, info};

use runtime::Subscription;

use crate::services::{MapService, UserInterfaceService};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BootPhase {
    WaitingForSplash,
    GlobeInitRequested,
    GlobeReady,
    /// Terminal for this run; there is no automatic retry.
    GlobeFailed,
}

/// Orchestrates the application loading flow over the bus.
///
/// Subscribes before other consumers attach so the latched boot channels
/// reflect truth it has already observed.
pub struct AppInitializer {
    phase: Rc<Cell<BootPhase>>,
    subscriptions: Vec<Subscription>,
}

impl Default for AppInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl AppInitializer {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(Cell::new(BootPhase::WaitingForSplash)),
            subscriptions: Vec::new(),
        }
    }

    pub fn initialize(&mut self, ui: &UserInterfaceService, map: &Rc<MapService>) {
        // Step 1: the splash signals completion; only the first signal
        // triggers globe initialization.
        let phase = Rc::clone(&self.phase);
        let map_on_splash = Rc::clone(map);
        self.subscriptions.push(ui.splash_ready.subscribe(move |_| {
            if phase.get() != BootPhase::WaitingForSplash {
                return;
            }
            info!("splash ready, triggering globe initialization");
            phase.set(BootPhase::GlobeInitRequested);
            map_on_splash.trigger_globe_initialization();
        }));

        // Step 2: observe the init outcome. Readiness does not auto-open the
        // menu; visibility stays user-triggered.
        let phase = Rc::clone(&self.phase);
        self.subscriptions
            .push(map.globe_init_status.subscribe(move |is_ready| {
                if phase.get() != BootPhase::GlobeInitRequested {
                    return;
                }
                if *is_ready {
                    info!("globe ready; menu waits for user interaction");
                    phase.set(BootPhase::GlobeReady);
                } else {
                    error!("globe failed to initialize");
                    phase.set(BootPhase::GlobeFailed);
                }
            }));

        // Step 3: viewer instance presence, for diagnostics only.
        self.subscriptions
            .push(map.globe_viewer.subscribe(|viewer| match viewer {
                Some(id) => info!(?id, "viewer instance received"),
                None => info!("viewer instance is empty (failed init or destroyed)"),
            }));
    }

    pub fn phase(&self) -> BootPhase {
        self.phase.get()
    }

    /// Releases every subscription. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.subscriptions.clear();
    }
}

use crate::clock::{SimulationClock, SubscriptionId};
use crate::config::AnimationConfig;
use crate::error::ImpactError;
use crate::geo::GeoPoint;
use crate::host::{best_effort, EntityId, EntitySpec, FlightId, Viewer};
use crate::results::{impact_zones, site_marker, site_status, ImpactResults};
use crate::scheduler::{Scheduler, TimerQueue};
use crate::session::{AnimationSession, SessionPhase};
use smallvec::SmallVec;
use std::time::Duration;

/// Owns the single active [`AnimationSession`] together with the logical
/// clock and the wall-clock scheduler, and routes host events to it.
///
/// The host calls [`ImpactAnimator::frame`] once per rendered frame and
/// [`ImpactAnimator::flight_completed`] whenever a fly-to finishes.
pub struct ImpactAnimator<S: Scheduler = TimerQueue> {
    config: AnimationConfig,
    clock: SimulationClock,
    scheduler: S,
    session: Option<AnimationSession>,
    site: Option<GeoPoint>,
    site_marker: Option<EntityId>,
    sessions_started: u64,
    seed: u64,
}

impl ImpactAnimator<TimerQueue> {
    pub fn new(config: AnimationConfig, seed: u64) -> Self {
        Self::with_scheduler(config, TimerQueue::new(), seed)
    }
}

impl<S: Scheduler> ImpactAnimator<S> {
    pub fn with_scheduler(config: AnimationConfig, scheduler: S, seed: u64) -> Self {
        Self {
            config,
            clock: SimulationClock::new(),
            scheduler,
            session: None,
            site: None,
            site_marker: None,
            sessions_started: 0,
            seed,
        }
    }

    /// Pick the impact site: clears everything on screen and drops a marker.
    /// Returns the status line to show.
    pub fn select_site<V: Viewer>(
        &mut self,
        longitude: f64,
        latitude: f64,
        viewer: &mut V,
    ) -> Result<String, ImpactError> {
        let site = validate_site(longitude, latitude)?;
        self.clear(viewer);
        self.site_marker = Some(viewer.add_entity(site_marker(site)));
        self.site = Some(site);
        Ok(site_status(site))
    }

    /// Animate an impact at the selected site.
    pub fn animate_selected<V: Viewer>(
        &mut self,
        results: &ImpactResults,
        viewer: &mut V,
    ) -> Result<(), ImpactError> {
        let site = self.site.ok_or(ImpactError::NoSiteSelected)?;
        self.animate_impact(site.longitude, site.latitude, results, viewer)
    }

    /// Start the full sequence for an impact at (`longitude`, `latitude`).
    ///
    /// Any previous session is torn down first, with all of its timers and
    /// subscriptions cancelled. Invalid parameters leave the current state
    /// untouched.
    pub fn animate_impact<V: Viewer>(
        &mut self,
        longitude: f64,
        latitude: f64,
        results: &ImpactResults,
        viewer: &mut V,
    ) -> Result<(), ImpactError> {
        let site = validate_site(longitude, latitude)?;
        let id = self.sessions_started + 1;
        // per-session stream derived from the base seed
        let seed = self.seed ^ id.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let start = self.scheduler.now().as_secs_f64();
        let mut session = AnimationSession::new(id, site, &self.config, start, seed)?;

        self.end_session(viewer);
        if self.site != Some(site) {
            if let Some(marker) = self.site_marker.take() {
                best_effort("remove site marker", viewer.remove_entity(marker));
            }
            self.site = Some(site);
        }
        self.sessions_started = id;

        session.begin(viewer, &mut self.clock);
        for zone in impact_zones(site, results) {
            let entity = viewer.add_entity(EntitySpec::Zone(zone));
            session.adopt_entity(entity);
        }
        self.session = Some(session);
        Ok(())
    }

    /// Deliver due wall-clock timers, then advance the logical clock and
    /// deliver its tick.
    pub fn frame<V: Viewer>(&mut self, elapsed: Duration, viewer: &mut V) {
        self.scheduler.advance(elapsed);
        while let Some(fired) = self.scheduler.next_due() {
            let handled = match self.session.as_mut() {
                Some(session) => session.on_timer(fired, viewer, &mut self.scheduler),
                None => false,
            };
            if !handled {
                log::debug!("[animator] dropping fire of {:?}", fired.id);
                self.scheduler.cancel(fired.id);
            }
        }

        let Some(tick) = self.clock.advance(elapsed) else {
            return;
        };
        let subscribers: SmallVec<[SubscriptionId; 2]> =
            self.clock.subscribers().iter().copied().collect();
        for subscription in subscribers {
            if !self.clock.is_subscribed(subscription) {
                continue;
            }
            if let Some(session) = self.session.as_mut() {
                session.on_tick(
                    subscription,
                    tick,
                    viewer,
                    &mut self.clock,
                    &mut self.scheduler,
                );
            }
        }
    }

    /// Host notification that a fly-to finished.
    pub fn flight_completed(&mut self, flight: FlightId) -> bool {
        match self.session.as_mut() {
            Some(session) => session.on_flight_complete(flight, &mut self.clock),
            None => false,
        }
    }

    /// Tear down the active session and remove the site marker.
    pub fn clear<V: Viewer>(&mut self, viewer: &mut V) {
        self.end_session(viewer);
        if let Some(marker) = self.site_marker.take() {
            best_effort("remove site marker", viewer.remove_entity(marker));
        }
        self.site = None;
    }

    fn end_session<V: Viewer>(&mut self, viewer: &mut V) {
        if let Some(mut previous) = self.session.take() {
            previous.teardown(viewer, &mut self.clock, &mut self.scheduler);
        }
        self.clock.reset();
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> Option<SessionPhase> {
        self.session.as_ref().map(AnimationSession::phase)
    }

    /// True when the active session reached its final framing with nothing pending.
    pub fn is_settled(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.is_terminal() && self.scheduler.pending() == 0)
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn site(&self) -> Option<GeoPoint> {
        self.site
    }

    pub fn site_marker(&self) -> Option<EntityId> {
        self.site_marker
    }
}

fn validate_site(longitude: f64, latitude: f64) -> Result<GeoPoint, ImpactError> {
    if !longitude.is_finite() || !latitude.is_finite() {
        log::warn!("[animator] rejecting site lon {longitude}, lat {latitude}");
        return Err(ImpactError::InvalidSite {
            lon: longitude,
            lat: latitude,
        });
    }
    Ok(GeoPoint::on_surface(longitude, latitude))
}

//! Ride session state: the current ride, its status and the rider's history.
//!
//! Matching and dispatch happen elsewhere; this crate only records what the
//! client was told. Completing a ride feeds the current user's stats and pays
//! the ride tokens.

use {
    bevy::prelude::*,
    chrono::{DateTime, Utc},
    hitch_events::TokensEarned,
    profile_resources::CurrentUser,
    progression_components::TokenSource,
    settings::ClientSettings,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RideStatus {
    #[default]
    Idle,
    Searching,
    Matched,
    Ongoing,
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    pub id: String,
    pub pilot_id: Option<String>,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub co2_saved_kg: f64,
    pub is_eco: bool,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RideRequest {
    pub id: String,
    pub rider_id: String,
    pub origin: String,
    pub destination: String,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPilot {
    pub id: String,
    pub display_name: String,
    pub trust_score: f64,
    pub distance_km: f64,
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct RideSession {
    pub status: RideStatus,
    pub current_ride: Option<Ride>,
    pub history: Vec<Ride>,
    pub active_requests: Vec<RideRequest>,
    pub nearby_pilots: Vec<NearbyPilot>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Message, Debug, Clone)]
pub enum RideAction {
    SetStatus(RideStatus),
    SetCurrentRide(Option<Ride>),
    AddRequest(RideRequest),
    RemoveRequest(String),
    SetNearbyPilots(Vec<NearbyPilot>),
    AddToHistory(Ride),
    CompleteRide,
    SetLoading(bool),
    SetError(String),
    ClearError,
    /// Back to idle. History and nearby pilots are kept.
    Reset,
}

impl RideSession {
    /// Applies one action. Returns the ride that `CompleteRide` finished, if any.
    pub fn apply(&mut self, action: RideAction) -> Option<Ride> {
        match action {
            RideAction::SetStatus(status) => self.status = status,
            RideAction::SetCurrentRide(ride) => self.current_ride = ride,
            RideAction::AddRequest(request) => self.active_requests.push(request),
            RideAction::RemoveRequest(id) => self.active_requests.retain(|r| r.id != id),
            RideAction::SetNearbyPilots(pilots) => self.nearby_pilots = pilots,
            RideAction::AddToHistory(ride) => self.history.push(ride),
            RideAction::CompleteRide => {
                let ride = self.current_ride.take()?;
                self.history.push(ride.clone());
                self.status = RideStatus::Completed;
                return Some(ride);
            }
            RideAction::SetLoading(loading) => self.loading = loading,
            RideAction::SetError(error) => self.error = Some(error),
            RideAction::ClearError => self.error = None,
            RideAction::Reset => {
                self.current_ride = None;
                self.status = RideStatus::Idle;
                self.active_requests.clear();
                self.error = None;
            }
        }
        None
    }
}

/// A ride moved from `current_ride` into history.
///
/// # Observers
/// - `record_completed_ride`: bumps ride, distance and CO2 stats and pays ride tokens.
#[derive(Event, Debug, Clone)]
pub struct RideCompleted {
    pub ride: Ride,
}

pub struct RidesPlugin;

impl Plugin for RidesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RideSession>()
            .init_resource::<ClientSettings>()
            .add_message::<RideAction>()
            .add_systems(Update, apply_ride_actions)
            .add_observer(record_completed_ride);
    }
}

pub fn apply_ride_actions(
    mut actions: MessageReader<RideAction>,
    mut session: ResMut<RideSession>,
    mut commands: Commands,
) {
    for action in actions.read() {
        if matches!(action, RideAction::CompleteRide) && session.current_ride.is_none() {
            debug!("no current ride to complete");
            continue;
        }
        if let Some(ride) = session.apply(action.clone()) {
            info!(ride_id = %ride.id, distance_km = ride.distance_km, "ride completed");
            commands.trigger(RideCompleted { ride });
        }
    }
}

pub fn record_completed_ride(
    trigger: On<RideCompleted>,
    mut user: ResMut<CurrentUser>,
    settings: Res<ClientSettings>,
    mut commands: Commands,
) {
    let ride = &trigger.event().ride;
    let stats = &mut user.stats;
    stats.total_rides = stats.total_rides.saturating_add(1);
    stats.distance_traveled += ride.distance_km.max(0.0);
    stats.co2_saved += ride.co2_saved_kg.max(0.0);

    let rewards = settings.token_rewards;
    commands.trigger(TokensEarned {
        amount: rewards.ride,
        source: TokenSource::Travel,
        reference: Some(ride.id.clone()),
    });
    if ride.is_eco {
        commands.trigger(TokensEarned {
            amount: rewards.eco_ride,
            source: TokenSource::Eco,
            reference: Some(ride.id.clone()),
        });
    }
}

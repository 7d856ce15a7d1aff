use {
    bevy::{prelude::*, state::app::StatesPlugin},
    catalog_assets::BadgeDefinition,
    hitch_core::CorePlugin,
    profile_resources::CurrentUser,
    progression::ProfileView,
    progression_components::{BadgeCategory, Rarity, Requirement, RequirementKey},
    rides::{Ride, RideAction},
    wallet::TokenLedger,
};

#[test]
fn completed_ride_pays_tokens_and_unlocks_badge() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(StatesPlugin)
        .add_plugins(AssetPlugin::default())
        .add_plugins(CorePlugin);

    // Held so the badge outlives the first update.
    let _first_ride = app
        .world_mut()
        .resource_mut::<Assets<BadgeDefinition>>()
        .add(BadgeDefinition {
            id: "first_ride".into(),
            name: "First Ride".into(),
            title: "Rookie Hitcher".into(),
            description: "Complete your first ride".into(),
            icon: "car".into(),
            category: BadgeCategory::Rides,
            rarity: Rarity::Common,
            requirements: Some(Requirement::default().with(RequirementKey::TotalRides, 1.0)),
            reward_tokens: 10,
            is_active: true,
        });
    {
        let mut user = app.world_mut().resource_mut::<CurrentUser>();
        user.id = "dev".into();
        user.display_name = "Dev".into();
    }
    app.update();
    assert_eq!(app.world().resource::<ProfileView>().title, "New Hitcher");

    app.world_mut()
        .write_message(RideAction::SetCurrentRide(Some(Ride {
            id: "ride-1".into(),
            pilot_id: None,
            origin: "Andheri".into(),
            destination: "Bandra".into(),
            distance_km: 9.0,
            co2_saved_kg: 1.1,
            is_eco: true,
            started_at: None,
        })));
    app.world_mut().write_message(RideAction::CompleteRide);
    for _ in 0..3 {
        app.update();
    }

    let stats = &app.world().resource::<CurrentUser>().stats;
    assert_eq!(stats.total_rides, 1);
    assert_eq!(stats.tokens, 75);

    let ledger = app.world().resource::<TokenLedger>();
    assert_eq!(ledger.breakdown.travel_tokens, 50);
    assert_eq!(ledger.breakdown.eco_tokens, 25);
    assert_eq!(ledger.badges, vec!["first_ride"]);

    assert_eq!(
        app.world().resource::<ProfileView>().title,
        "Rookie Hitcher"
    );
}

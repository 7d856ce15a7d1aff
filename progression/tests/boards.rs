use {
    bevy::prelude::*,
    catalog_assets::{BadgeDefinition, QuestDefinition, QuestRewards},
    chrono::{TimeZone, Utc},
    hitch_events::BadgeEarned,
    profile_resources::{CurrentUser, ProfileResourcesPlugin},
    progression::*,
    progression_components::{
        BadgeCategory, QuestRequirement, QuestType, Rarity, Requirement, RequirementKey, UserStats,
    },
};

#[derive(Resource, Default)]
struct EarnedLog(Vec<String>);

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(AssetPlugin::default())
        .init_asset::<BadgeDefinition>()
        .init_asset::<QuestDefinition>()
        .add_plugins(ProfileResourcesPlugin)
        .add_plugins(ProgressionPlugin)
        .init_resource::<EarnedLog>()
        .add_observer(|trigger: On<BadgeEarned>, mut log: ResMut<EarnedLog>| {
            log.0.push(trigger.event().badge_id.clone());
        });
    app
}

fn badge(id: &str, rarity: Rarity, title: &str, requirements: Option<Requirement>) -> BadgeDefinition {
    BadgeDefinition {
        id: id.into(),
        name: id.into(),
        title: title.into(),
        description: String::new(),
        icon: String::new(),
        category: BadgeCategory::Rides,
        rarity,
        requirements,
        reward_tokens: 0,
        is_active: true,
    }
}

// Assets are freed once their last strong handle drops, so tests keep the handles.
fn add_badges(app: &mut App, badges: Vec<BadgeDefinition>) -> Vec<Handle<BadgeDefinition>> {
    let mut assets = app.world_mut().resource_mut::<Assets<BadgeDefinition>>();
    badges.into_iter().map(|badge| assets.add(badge)).collect()
}

fn add_quests(app: &mut App, quests: Vec<QuestDefinition>) -> Vec<Handle<QuestDefinition>> {
    let mut assets = app.world_mut().resource_mut::<Assets<QuestDefinition>>();
    quests.into_iter().map(|quest| assets.add(quest)).collect()
}

fn streak_quest(id: &str, days: f64, tokens: Option<u32>) -> QuestDefinition {
    QuestDefinition {
        id: id.into(),
        title: "Week Warrior".into(),
        description: String::new(),
        quest_type: QuestType::Individual,
        requirements: QuestRequirement {
            streak_days: Some(days),
            ..Default::default()
        },
        start_date: Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2025, 8, 31, 0, 0, 0).unwrap(),
        is_active: true,
        rewards: QuestRewards { tokens, badge: None },
    }
}

#[derive(Resource, Default)]
struct Paid(Vec<(u32, String)>);

fn record_payouts(app: &mut App) {
    app.init_resource::<Paid>()
        .add_observer(|trigger: On<hitch_events::TokensEarned>, mut paid: ResMut<Paid>| {
            let event = trigger.event();
            paid.0
                .push((event.amount, event.reference.clone().unwrap_or_default()));
        });
    let now = Utc.with_ymd_and_hms(2025, 8, 10, 9, 0, 0).unwrap();
    app.insert_resource(QuestClock::fixed(now));
}

fn set_streak(app: &mut App, days: u32) {
    app.world_mut()
        .resource_mut::<CurrentUser>()
        .stats
        .current_streak = days;
    app.update();
}

fn sign_in(app: &mut App, stats: UserStats) {
    app.insert_resource(CurrentUser {
        id: "asha".into(),
        display_name: "Asha".into(),
        bio: String::new(),
        stats,
    });
}

#[test]
fn badge_board_tracks_earned_badges_and_title() {
    let mut app = test_app();
    let _badges = add_badges(
        &mut app,
        vec![
            badge(
                "first_ride",
                Rarity::Common,
                "Rookie",
                Some(Requirement::default().with(RequirementKey::TotalRides, 1.0)),
            ),
            badge(
                "ten_rides",
                Rarity::Rare,
                "Voyager",
                Some(Requirement::default().with(RequirementKey::TotalRides, 10.0)),
            ),
            badge("legacy", Rarity::Legendary, "Founder", None),
        ],
    );
    sign_in(
        &mut app,
        UserStats {
            total_rides: 4,
            ..Default::default()
        },
    );
    app.update();

    {
        let board = app.world().resource::<BadgeBoard>();
        assert_eq!(board.entries.len(), 3);
        assert_eq!(board.earned_count, 1);
        assert_eq!(board.completion_percent, 33);
        assert!(board.is_earned("first_ride"));
        assert!(!board.is_earned("legacy"), "badge without requirements is never earned");

        let profile = app.world().resource::<ProfileView>();
        assert_eq!(profile.title, "Rookie");
        assert!(
            app.world().resource::<EarnedLog>().0.is_empty(),
            "first board for a user is the baseline"
        );
    }

    app.world_mut()
        .resource_mut::<CurrentUser>()
        .stats
        .total_rides = 10;
    app.update();

    assert_eq!(app.world().resource::<EarnedLog>().0, vec!["ten_rides"]);
    assert_eq!(app.world().resource::<ProfileView>().title, "Voyager");
    assert_eq!(app.world().resource::<BadgeBoard>().earned_count, 2);
}

#[test]
fn signed_out_user_builds_no_board() {
    let mut app = test_app();
    let _badges = add_badges(
        &mut app,
        vec![badge("welcome", Rarity::Common, "Hitcher", Some(Requirement::default()))],
    );
    app.update();

    assert!(app.world().resource::<BadgeBoard>().entries.is_empty());
    assert_eq!(app.world().resource::<ProfileView>().title, NEW_HITCHER_TITLE);
}

#[test]
fn quest_board_reports_progress_and_windows() {
    let mut app = test_app();
    let now = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
    app.insert_resource(QuestClock::fixed(now));

    let _quests = add_quests(
        &mut app,
        vec![
            QuestDefinition {
                id: "monsoon".into(),
                title: "Monsoon Miles".into(),
                description: String::new(),
                quest_type: QuestType::Individual,
                requirements: QuestRequirement {
                    rides_count: Some(10.0),
                    distance_km: Some(100.0),
                    ..Default::default()
                },
                start_date: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2025, 7, 31, 0, 0, 0).unwrap(),
                is_active: true,
                rewards: QuestRewards {
                    tokens: Some(300),
                    badge: None,
                },
            },
            QuestDefinition {
                id: "spring".into(),
                title: "Spring Carpool".into(),
                description: String::new(),
                quest_type: QuestType::Community,
                requirements: QuestRequirement {
                    streak_days: Some(5.0),
                    ..Default::default()
                },
                start_date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap(),
                is_active: true,
                rewards: QuestRewards {
                    tokens: Some(50),
                    badge: None,
                },
            },
        ],
    );

    let mut stats = UserStats {
        total_rides: 5,
        distance_traveled: 20.0,
        ..Default::default()
    };
    stats.active_quests.insert("monsoon".into());
    sign_in(&mut app, stats);
    app.update();

    let board = app.world().resource::<QuestBoard>();
    let monsoon = board.entries.iter().find(|q| q.id == "monsoon").unwrap();
    assert!(monsoon.active);
    assert!(monsoon.joined);
    assert_eq!(monsoon.progress, 23);

    let spring = board.entries.iter().find(|q| q.id == "spring").unwrap();
    assert!(!spring.active);
    assert!(!spring.joined);

    assert_eq!(board.active_count(QuestType::Individual), 1);
    assert_eq!(board.active_count(QuestType::Community), 0);
    assert_eq!(board.total_reward_tokens, 350);
}

#[test]
fn completing_a_joined_quest_pays_once() {
    let mut app = test_app();
    record_payouts(&mut app);
    let _quests = add_quests(&mut app, vec![streak_quest("streak_week", 7.0, None)]);

    let mut stats = UserStats {
        current_streak: 5,
        ..Default::default()
    };
    stats.active_quests.insert("streak_week".into());
    sign_in(&mut app, stats);
    app.update();
    assert!(app.world().resource::<Paid>().0.is_empty());

    set_streak(&mut app, 7);
    set_streak(&mut app, 8);

    assert_eq!(
        app.world().resource::<Paid>().0,
        vec![(100, "streak_week".to_string())]
    );
    assert!(app
        .world()
        .resource::<CurrentUser>()
        .stats
        .completed_quests
        .contains("streak_week"));
}

#[test]
fn broken_streak_does_not_pay_quest_again() {
    let mut app = test_app();
    record_payouts(&mut app);
    let _quests = add_quests(&mut app, vec![streak_quest("streak_week", 7.0, Some(300))]);

    let mut stats = UserStats::default();
    stats.active_quests.insert("streak_week".into());
    sign_in(&mut app, stats);
    app.update();

    for days in [7, 0, 7, 0, 7] {
        set_streak(&mut app, days);
    }

    assert_eq!(
        app.world().resource::<Paid>().0,
        vec![(300, "streak_week".to_string())]
    );
}

#[test]
fn quest_complete_on_load_is_recorded_without_payout() {
    let mut app = test_app();
    record_payouts(&mut app);
    let _quests = add_quests(&mut app, vec![streak_quest("streak_week", 7.0, Some(300))]);

    let mut stats = UserStats {
        current_streak: 9,
        ..Default::default()
    };
    stats.active_quests.insert("streak_week".into());
    sign_in(&mut app, stats);
    app.update();
    set_streak(&mut app, 0);
    set_streak(&mut app, 7);

    assert!(app.world().resource::<Paid>().0.is_empty());
}

#[test]
fn category_completion_counts_one_category() {
    let mut app = test_app();
    let mut eco = badge(
        "eco_hero",
        Rarity::Epic,
        "Eco Hero",
        Some(Requirement::default().with(RequirementKey::Co2Saved, 50.0)),
    );
    eco.category = BadgeCategory::Eco;
    let _badges = add_badges(
        &mut app,
        vec![
            badge(
                "first_ride",
                Rarity::Common,
                "Rookie",
                Some(Requirement::default().with(RequirementKey::TotalRides, 1.0)),
            ),
            badge(
                "ten_rides",
                Rarity::Rare,
                "Voyager",
                Some(Requirement::default().with(RequirementKey::TotalRides, 10.0)),
            ),
            eco,
        ],
    );
    sign_in(
        &mut app,
        UserStats {
            total_rides: 3,
            ..Default::default()
        },
    );
    app.update();

    let board = app.world().resource::<BadgeBoard>();
    assert_eq!(board.category_completion(None), (1, 3, 33));
    assert_eq!(board.category_completion(Some(BadgeCategory::Rides)), (1, 2, 50));
    assert_eq!(board.category_completion(Some(BadgeCategory::Eco)), (0, 1, 0));
    assert_eq!(board.category_completion(Some(BadgeCategory::Social)), (0, 0, 0));
}

use {catalog_assets::BadgeDefinition, progression_components::Rarity};

/// Shown when no badge has been earned yet.
pub const NEW_HITCHER_TITLE: &str = "New Hitcher";

/// Title of the best earned badge by rarity.
///
/// Within one tier the first badge in `earned` wins. Callers that want a stable
/// answer must pass a stably ordered collection (the badge board sorts by id).
pub fn current_title<'a>(earned: impl IntoIterator<Item = &'a BadgeDefinition>) -> &'a str {
    let earned: Vec<&BadgeDefinition> = earned.into_iter().collect();

    Rarity::PRECEDENCE
        .iter()
        .find_map(|tier| earned.iter().find(|badge| badge.rarity == *tier))
        .map(|badge| badge.title.as_str())
        .unwrap_or(NEW_HITCHER_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(id: &str, rarity: Rarity, title: &str) -> BadgeDefinition {
        BadgeDefinition {
            id: id.into(),
            name: id.into(),
            title: title.into(),
            description: String::new(),
            icon: String::new(),
            category: Default::default(),
            rarity,
            requirements: Some(Default::default()),
            reward_tokens: 0,
            is_active: true,
        }
    }

    #[test]
    fn rare_outranks_common() {
        let earned = [
            badge("voyager", Rarity::Rare, "Voyager"),
            badge("rookie", Rarity::Common, "Rookie"),
        ];
        assert_eq!(current_title(&earned), "Voyager");
    }

    #[test]
    fn legendary_wins_regardless_of_position() {
        let earned = [
            badge("a", Rarity::Uncommon, "Explorer"),
            badge("b", Rarity::Epic, "Road Sage"),
            badge("c", Rarity::Legendary, "Highway Legend"),
        ];
        assert_eq!(current_title(&earned), "Highway Legend");
    }

    #[test]
    fn first_in_tier_wins() {
        let earned = [
            badge("a", Rarity::Rare, "First"),
            badge("b", Rarity::Rare, "Second"),
        ];
        assert_eq!(current_title(&earned), "First");
    }

    #[test]
    fn nothing_earned_is_new_hitcher() {
        let none: [BadgeDefinition; 0] = [];
        assert_eq!(current_title(&none), NEW_HITCHER_TITLE);
    }
}

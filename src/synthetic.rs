//! Built-in slang list used in mock mode and as the fallback when every
//! web source comes up empty.

use crate::models::SlangRecord;
use chrono::Utc;

pub const SYNTHETIC_SOURCE: &str = "mock_database";

/// One entry of the built-in list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticEntry {
    pub term: &'static str,
    pub definition: &'static str,
    pub example: &'static str,
    pub category: &'static str,
    pub polish: &'static str,
    pub pronunciation: &'static str,
}

impl SyntheticEntry {
    pub fn to_record(&self) -> SlangRecord {
        SlangRecord {
            term: self.term.to_string(),
            definition: self.definition.to_string(),
            example: self.example.to_string(),
            category: self.category.to_string(),
            polish: self.polish.to_string(),
            pronunciation: self.pronunciation.to_string(),
            source: SYNTHETIC_SOURCE.to_string(),
            source_url: None,
            search_date: Utc::now(),
        }
    }
}

pub static SYNTHETIC_TERMS: &[SyntheticEntry] = &[
    SyntheticEntry {
        term: "brilliant",
        definition: "Excellent, wonderful, or great",
        example: "That's absolutely brilliant!",
        category: "praise",
        polish: "Wspaniały, świetny, doskonały",
        pronunciation: "BRIL-yənt",
    },
    SyntheticEntry {
        term: "chuffed",
        definition: "Very pleased or happy",
        example: "I'm dead chuffed with my new car!",
        category: "emotion",
        polish: "Bardzo zadowolony, uszczęśliwiony",
        pronunciation: "CHUFED",
    },
    SyntheticEntry {
        term: "gutted",
        definition: "Extremely disappointed or upset",
        example: "I was gutted when they cancelled the concert.",
        category: "emotion",
        polish: "Bardzo rozczarowany, zdruzgotany",
        pronunciation: "GUT-id",
    },
    SyntheticEntry {
        term: "knackered",
        definition: "Very tired or exhausted",
        example: "I'm absolutely knackered after that workout.",
        category: "state",
        polish: "Wykończony, zmęczony, wycieńczony",
        pronunciation: "NAK-əd",
    },
    SyntheticEntry {
        term: "peckish",
        definition: "Slightly hungry",
        example: "I'm feeling a bit peckish, fancy a snack?",
        category: "state",
        polish: "Lekko głodny, mający ochotę na przekąskę",
        pronunciation: "PEK-ish",
    },
    SyntheticEntry {
        term: "cheeky",
        definition: "Playfully rude or impudent",
        example: "Don't be so cheeky!",
        category: "behavior",
        polish: "Bezczelny (w zabawny sposób), zuchwały",
        pronunciation: "CHEE-kee",
    },
    SyntheticEntry {
        term: "dodgy",
        definition: "Suspicious, unreliable, or of poor quality",
        example: "That pub looks a bit dodgy.",
        category: "description",
        polish: "Podejrzany, wątpliwy, kiepski",
        pronunciation: "DOJ-ee",
    },
    SyntheticEntry {
        term: "fancy",
        definition: "To want or desire something; to like someone romantically",
        example: "Do you fancy a cuppa?",
        category: "desire",
        polish: "Mieć ochotę na coś, podobać się",
        pronunciation: "FAN-see",
    },
    SyntheticEntry {
        term: "kip",
        definition: "Sleep or a nap",
        example: "I need to have a kip.",
        category: "action",
        polish: "Drzemka, sen, przespać się",
        pronunciation: "KIP",
    },
    SyntheticEntry {
        term: "mate",
        definition: "Friend or buddy",
        example: "Alright, mate?",
        category: "greeting",
        polish: "Kumpel, kolega, ziomek",
        pronunciation: "MATE",
    },
    SyntheticEntry {
        term: "quid",
        definition: "British pound (£1)",
        example: "That costs twenty quid.",
        category: "money",
        polish: "Funt brytyjski (potocznie)",
        pronunciation: "KWID",
    },
    SyntheticEntry {
        term: "bloke",
        definition: "A man or guy",
        example: "He's a decent bloke.",
        category: "person",
        polish: "Facet, gość, koleś",
        pronunciation: "BLOKE",
    },
    SyntheticEntry {
        term: "cheers",
        definition: "Thank you or goodbye",
        example: "Cheers for the help!",
        category: "greeting",
        polish: "Dzięki, na zdrowie, do zobaczenia",
        pronunciation: "CHEERZ",
    },
    SyntheticEntry {
        term: "proper",
        definition: "Very or really; genuine",
        example: "That was proper good!",
        category: "intensifier",
        polish: "Naprawdę, bardzo, porządny",
        pronunciation: "PROP-ər",
    },
    SyntheticEntry {
        term: "mental",
        definition: "Crazy or insane",
        example: "The party was absolutely mental!",
        category: "description",
        polish: "Szalony, zwariowany, obłąkany",
        pronunciation: "MEN-təl",
    },
    SyntheticEntry {
        term: "brolly",
        definition: "Umbrella",
        example: "Better bring a brolly, it looks like rain.",
        category: "object",
        polish: "Parasol, parasolka",
        pronunciation: "BROL-ee",
    },
    SyntheticEntry {
        term: "bog",
        definition: "Toilet or bathroom",
        example: "Where's the bog?",
        category: "place",
        polish: "Kibel, toaleta (potocznie)",
        pronunciation: "BOG",
    },
    SyntheticEntry {
        term: "naff",
        definition: "Uncool, unfashionable, or of poor quality",
        example: "That shirt is a bit naff.",
        category: "description",
        polish: "Niemodny, kiepski, tandetny",
        pronunciation: "NAF",
    },
    SyntheticEntry {
        term: "gobsmacked",
        definition: "Utterly astonished or amazed",
        example: "I was absolutely gobsmacked!",
        category: "emotion",
        polish: "Zszokowany, oszołomiony, zdumiony",
        pronunciation: "GOB-smakt",
    },
    SyntheticEntry {
        term: "skint",
        definition: "Having no money; broke",
        example: "I'm completely skint this month.",
        category: "state",
        polish: "Spłukany, bez grosza",
        pronunciation: "SKINT",
    },
    SyntheticEntry {
        term: "bog-standard",
        definition: "Ordinary, basic, nothing special",
        example: "It's just a bog-standard car.",
        category: "description",
        polish: "Zwyczajny, podstawowy, standardowy",
        pronunciation: "BOG-STAN-dərd",
    },
    SyntheticEntry {
        term: "botched",
        definition: "Done badly or clumsily",
        example: "They completely botched the repair.",
        category: "action",
        polish: "Spartaczony, zepsuty, źle wykonany",
        pronunciation: "BOTCHT",
    },
    SyntheticEntry {
        term: "chinwag",
        definition: "A chat or conversation",
        example: "Let's have a chinwag over tea.",
        category: "action",
        polish: "Pogawędka, pogaduszki",
        pronunciation: "CHIN-wag",
    },
    SyntheticEntry {
        term: "faff",
        definition: "To waste time on trivial things",
        example: "Stop faffing about and get ready!",
        category: "action",
        polish: "Marnować czas, obijać się",
        pronunciation: "FAF",
    },
    SyntheticEntry {
        term: "miffed",
        definition: "Slightly annoyed or offended",
        example: "She was a bit miffed about the comment.",
        category: "emotion",
        polish: "Urażony, lekko zdenerwowany",
        pronunciation: "MIFT",
    },
    SyntheticEntry {
        term: "cuppa",
        definition: "A cup of tea",
        example: "Fancy a cuppa?",
        category: "food",
        polish: "Filiżanka herbaty",
        pronunciation: "KUP-ə",
    },
    SyntheticEntry {
        term: "barmy",
        definition: "Crazy, foolish",
        example: "You must be barmy!",
        category: "description",
        polish: "Zwariowany, stuknięty",
        pronunciation: "BAR-mee",
    },
    SyntheticEntry {
        term: "codswallop",
        definition: "Nonsense, rubbish",
        example: "That's complete codswallop!",
        category: "description",
        polish: "Bzdury, bujda, nonsens",
        pronunciation: "KODZ-wol-əp",
    },
    SyntheticEntry {
        term: "daft",
        definition: "Silly, stupid",
        example: "Don't be daft!",
        category: "description",
        polish: "Głupi, niemądry, durny",
        pronunciation: "DAFT",
    },
    SyntheticEntry {
        term: "jammy",
        definition: "Lucky",
        example: "You jammy git!",
        category: "description",
        polish: "Szczęściarz, mający fart",
        pronunciation: "JAM-ee",
    },
    SyntheticEntry {
        term: "nosh",
        definition: "Food",
        example: "Let's grab some nosh.",
        category: "food",
        polish: "Żarcie, jedzenie",
        pronunciation: "NOSH",
    },
    SyntheticEntry {
        term: "scrummy",
        definition: "Delicious",
        example: "That cake was scrummy!",
        category: "food",
        polish: "Pyszny, smaczny",
        pronunciation: "SKRUM-ee",
    },
    SyntheticEntry {
        term: "knickers",
        definition: "Women's underwear",
        example: "Don't get your knickers in a twist!",
        category: "clothing",
        polish: "Majtki damskie",
        pronunciation: "NIK-ərz",
    },
    SyntheticEntry {
        term: "trollied",
        definition: "Very drunk",
        example: "He was completely trollied!",
        category: "state",
        polish: "Zalany, pijany w trupa",
        pronunciation: "TROL-eed",
    },
    SyntheticEntry {
        term: "wazzock",
        definition: "A stupid or annoying person",
        example: "You absolute wazzock!",
        category: "insult",
        polish: "Idiota, dureń, pajac",
        pronunciation: "WAZ-ək",
    },
    SyntheticEntry {
        term: "wonky",
        definition: "Unsteady, not straight",
        example: "That table is a bit wonky.",
        category: "description",
        polish: "Krzywy, chwiejny, nierówny",
        pronunciation: "WON-kee",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_list_is_complete_and_unique() {
        assert_eq!(SYNTHETIC_TERMS.len(), 36);
        let names: HashSet<String> = SYNTHETIC_TERMS
            .iter()
            .map(|e| e.term.to_lowercase())
            .collect();
        assert_eq!(names.len(), SYNTHETIC_TERMS.len());
        for entry in SYNTHETIC_TERMS {
            assert!(!entry.term.is_empty());
            assert!(!entry.definition.is_empty());
            assert!(!entry.polish.is_empty());
            assert!(!entry.pronunciation.is_empty());
        }
    }

    #[test]
    fn test_to_record() {
        let record = SYNTHETIC_TERMS[1].to_record();
        assert_eq!(record.term, "chuffed");
        assert_eq!(record.source, SYNTHETIC_SOURCE);
        assert_eq!(record.source_url, None);
    }
}

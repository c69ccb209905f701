use serde::Serialize;

use crate::models::Language;

/// User-visible notices and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Message {
    AddIngredientsFirst,
    NoRecipeFound,
    FavoritesLimitReached,
    FieldRequired,
    InvalidEmail,
    LoginError,
    NotAuthenticated,
    NoIngredientsFound,
    CameraError,
    GenericScanError,
    RecipeServiceError,
    ScanServiceError,
    RequestInProgress,
}

/// A message rendered for the client: stable key plus localized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub key: Message,
    pub text: &'static str,
}

impl Message {
    pub fn notice(self, lang: Language) -> Notice {
        Notice {
            key: self,
            text: self.text(lang),
        }
    }

    pub fn text(&self, lang: Language) -> &'static str {
        match lang {
            Language::It => self.italian(),
            Language::En => self.english(),
        }
    }

    fn italian(&self) -> &'static str {
        match self {
            Message::AddIngredientsFirst => "Aggiungi prima qualche ingrediente!",
            Message::NoRecipeFound => {
                "La Nonna non ha trovato una ricetta con questi ingredienti. Prova ad aggiungerne altri!"
            }
            Message::FavoritesLimitReached => {
                "Hai raggiunto il limite di 12 ricette preferite. Rimuovine una per salvarne un'altra."
            }
            Message::FieldRequired => "Questo campo è obbligatorio.",
            Message::InvalidEmail => "Inserisci un indirizzo email valido.",
            Message::LoginError => "Nessun account trovato con questa email. Registrati!",
            Message::NotAuthenticated => "Accedi per continuare.",
            Message::NoIngredientsFound => {
                "Nessun ingrediente riconosciuto. Prova con una foto più chiara."
            }
            Message::CameraError => {
                "Impossibile accedere alla fotocamera. Controlla i permessi e riprova."
            }
            Message::GenericScanError => "Errore durante la scansione. Riprova.",
            Message::RecipeServiceError => {
                "La Nonna sta facendo un pisolino e non le viene in mente nessuna ricetta. Riprova con altri ingredienti."
            }
            Message::ScanServiceError => {
                "Impossibile identificare gli ingredienti dall'immagine. Riprova."
            }
            Message::RequestInProgress => "Richiesta già in corso, attendi un momento.",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            Message::AddIngredientsFirst => "Add some ingredients first!",
            Message::NoRecipeFound => {
                "Nonna couldn't find a recipe with these ingredients. Try adding a few more!"
            }
            Message::FavoritesLimitReached => {
                "You've reached the limit of 12 favorite recipes. Remove one to save another."
            }
            Message::FieldRequired => "This field is required.",
            Message::InvalidEmail => "Please enter a valid email address.",
            Message::LoginError => "No account found with this email. Please register!",
            Message::NotAuthenticated => "Please log in to continue.",
            Message::NoIngredientsFound => "No ingredients recognized. Try a clearer photo.",
            Message::CameraError => {
                "Could not access the camera. Please check permissions and try again."
            }
            Message::GenericScanError => "Something went wrong while scanning. Please try again.",
            Message::RecipeServiceError => {
                "The Nonna is taking a nap and couldn't think of a recipe. Please try again with different ingredients."
            }
            Message::ScanServiceError => {
                "Failed to identify ingredients from the image. Please try again."
            }
            Message::RequestInProgress => "A request is already in progress, please wait.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_differ_by_language() {
        let msg = Message::NoRecipeFound;
        assert_ne!(msg.text(Language::It), msg.text(Language::En));
        assert!(Message::FavoritesLimitReached.text(Language::En).contains("12"));
    }

    #[test]
    fn test_message_key_serialization() {
        let key = serde_json::to_value(Message::AddIngredientsFirst).unwrap();
        assert_eq!(key, "addIngredientsFirst");

        let notice = serde_json::to_value(Message::LoginError.notice(Language::En)).unwrap();
        assert_eq!(notice["key"], "loginError");
        assert_eq!(notice["text"], Message::LoginError.text(Language::En));
    }
}

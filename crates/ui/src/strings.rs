//! Fixed UI text in both kiosk languages.

use kiosk_domain::{Language, LocalizedText};

/// A compile-time pair of English and Arabic strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    /// English text.
    pub english: &'static str,
    /// Arabic text.
    pub arabic: &'static str,
}

impl Phrase {
    /// Text for `language`.
    #[must_use]
    pub const fn get(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Arabic => self.arabic,
        }
    }

    /// Owned copy as [`LocalizedText`].
    #[must_use]
    pub fn localized(&self) -> LocalizedText {
        LocalizedText::new(self.english, self.arabic)
    }
}

/// Shown instead of transport error details.
pub const CONNECTION: Phrase = Phrase {
    english: "Cannot connect to the server. It may be offline or there is a network issue. Please Contact support.",
    arabic: "لا يمكن الاتصال بالخادم. قد يكون غير متصل أو هناك مشكلة في الشبكة. يرجى الاتصال بالدعم.",
};

/// Lead-in of the ticket confirmation; the service name follows directly.
pub const TICKET_ISSUED: Phrase = Phrase {
    english: "A ticket has been issued for ",
    arabic: "تم إصدار تذكرة ل",
};

/// Label of the button that closes the message screen.
pub const BACK: Phrase = Phrase {
    english: "Back",
    arabic: "العودة",
};

/// Title of a critical error screen.
pub const ERROR_TITLE: Phrase = Phrase {
    english: "Application Error",
    arabic: "خطأ في التطبيق",
};

/// Bootstrap failed.
pub const STARTUP_FAILED: Phrase = Phrase {
    english: "Application failed to start. Please contact support.",
    arabic: "تعذر تشغيل التطبيق. يرجى الاتصال بالدعم.",
};

/// The first screen design could not be fetched.
pub const SCREEN_LOAD_FAILED: Phrase = Phrase {
    english: "Could not load screen data. Please check the connection.",
    arabic: "تعذر تحميل بيانات الشاشة. يرجى التحقق من الاتصال.",
};

/// Shown while the first screen design is loading.
pub const LOADING: Phrase = Phrase {
    english: "Loading...",
    arabic: "جارٍ التحميل...",
};

/// Name of each language in itself, for the language switcher.
#[must_use]
pub const fn language_name(language: Language) -> &'static str {
    match language {
        Language::English => "English",
        Language::Arabic => "العربية",
    }
}

//! User-visible messages in English, Russian and Uzbek.
//!
//! Every string the dashboard shows outside of backend-provided content goes
//! through [`t`]. The table is a single `match` so a missing translation is a
//! compile error rather than a runtime fallback.

use greenmind_types::Language;

/// Keys for localized messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Loading,
    LoadFailed,
    AnalysisFailed,
    Analyzing,
    AnalysisBusy,
    AnalysisDone,
    AnalysisNeedsData,
    NoAnalysis,
    NoIssues,
    ChatWelcome,
    ChatFailed,
    ChatBusy,
    ChatThinking,
    ChatPlaceholder,
    Suggestions,
    NetworkHint,
    LanguageChanged,
    Exported,
    ExportFailed,
    NotAvailable,
    UnknownZone,
}

/// Translate a message key into the given language.
pub fn t(language: Language, message: Message) -> &'static str {
    let (en, ru, uz) = entry(message);
    match language {
        Language::En => en,
        Language::Ru => ru,
        Language::Uz => uz,
    }
}

/// Translation table: key -> (en, ru, uz).
fn entry(message: Message) -> (&'static str, &'static str, &'static str) {
    match message {
        Message::Loading => ("Loading factory data...", "Загрузка данных завода...", "Zavod ma'lumotlari yuklanmoqda..."),
        Message::LoadFailed => (
            "Could not load demo factory data. Press r to retry.",
            "Не удалось загрузить данные демо-завода. Нажмите r для повтора.",
            "Demo zavod ma'lumotlarini yuklab bo'lmadi. Qayta urinish uchun r ni bosing.",
        ),
        Message::AnalysisFailed => (
            "Failed to run analysis. Please try again.",
            "Не удалось выполнить анализ. Попробуйте снова.",
            "Tahlilni bajarib bo'lmadi. Qaytadan urinib ko'ring.",
        ),
        Message::Analyzing => ("Analyzing factory...", "Анализ завода...", "Zavod tahlil qilinmoqda..."),
        Message::AnalysisBusy => (
            "Analysis already in progress",
            "Анализ уже выполняется",
            "Tahlil allaqachon bajarilmoqda",
        ),
        Message::AnalysisDone => ("Analysis complete", "Анализ завершён", "Tahlil yakunlandi"),
        Message::AnalysisNeedsData => (
            "Factory data is not loaded yet. Press r to reload.",
            "Данные завода ещё не загружены. Нажмите r для перезагрузки.",
            "Zavod ma'lumotlari hali yuklanmagan. Qayta yuklash uchun r ni bosing.",
        ),
        Message::NoAnalysis => (
            "No analysis yet. Press a to analyze the factory.",
            "Анализа ещё нет. Нажмите a, чтобы проанализировать завод.",
            "Hali tahlil yo'q. Zavodni tahlil qilish uchun a ni bosing.",
        ),
        Message::NoIssues => ("No issues found", "Проблем не обнаружено", "Muammolar topilmadi"),
        Message::ChatWelcome => (
            "Hello! I'm GreenMind AI, your factory copilot. Ask me about CO₂ emissions, energy efficiency, predictive maintenance, or machine health!",
            "Здравствуйте! Я GreenMind AI, ваш помощник на заводе. Спросите меня о выбросах CO₂, энергоэффективности, предиктивном обслуживании или состоянии оборудования!",
            "Salom! Men GreenMind AI, zavodingiz yordamchisiman. CO₂ chiqindilari, energiya samaradorligi, bashoratli texnik xizmat yoki uskunalar holati haqida so'rang!",
        ),
        Message::ChatFailed => (
            "Sorry, I encountered an error. Please make sure the backend server is running and try again.",
            "Извините, произошла ошибка. Убедитесь, что сервер запущен, и попробуйте снова.",
            "Kechirasiz, xatolik yuz berdi. Server ishlayotganiga ishonch hosil qiling va qaytadan urinib ko'ring.",
        ),
        Message::ChatBusy => (
            "Waiting for the previous reply",
            "Ожидание предыдущего ответа",
            "Oldingi javob kutilmoqda",
        ),
        Message::ChatThinking => ("Thinking...", "Думаю...", "O'ylayapman..."),
        Message::ChatPlaceholder => (
            "Press i to type a message",
            "Нажмите i, чтобы ввести сообщение",
            "Xabar yozish uchun i ni bosing",
        ),
        Message::Suggestions => ("Suggestions", "Подсказки", "Takliflar"),
        Message::NetworkHint => (
            "Is the backend running?",
            "Сервер запущен?",
            "Server ishlayaptimi?",
        ),
        Message::LanguageChanged => ("Language: English", "Язык: Русский", "Til: O'zbekcha"),
        Message::Exported => ("Exported to", "Экспортировано в", "Eksport qilindi:"),
        Message::ExportFailed => ("Export failed", "Ошибка экспорта", "Eksport xatosi"),
        Message::NotAvailable => ("N/A", "Н/Д", "Mavjud emas"),
        Message::UnknownZone => ("Unknown Zone", "Неизвестная зона", "Noma'lum zona"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Message; 21] = [
        Message::Loading,
        Message::LoadFailed,
        Message::AnalysisFailed,
        Message::Analyzing,
        Message::AnalysisBusy,
        Message::AnalysisDone,
        Message::AnalysisNeedsData,
        Message::NoAnalysis,
        Message::NoIssues,
        Message::ChatWelcome,
        Message::ChatFailed,
        Message::ChatBusy,
        Message::ChatThinking,
        Message::ChatPlaceholder,
        Message::Suggestions,
        Message::NetworkHint,
        Message::LanguageChanged,
        Message::Exported,
        Message::ExportFailed,
        Message::NotAvailable,
        Message::UnknownZone,
    ];

    #[test]
    fn test_every_message_translated() {
        for message in ALL {
            for language in Language::ALL {
                assert!(!t(language, message).is_empty(), "{message:?} in {language}");
            }
        }
    }

    #[test]
    fn test_languages_differ() {
        assert_ne!(t(Language::En, Message::ChatFailed), t(Language::Ru, Message::ChatFailed));
        assert_ne!(t(Language::Ru, Message::NoIssues), t(Language::Uz, Message::NoIssues));
    }

    #[test]
    fn test_english_chat_error() {
        assert!(t(Language::En, Message::ChatFailed).starts_with("Sorry, I encountered an error"));
    }
}

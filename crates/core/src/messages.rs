//! Fixed user-facing messages, per locale.
//!
//! These strings end up in reports (`errorMessage`, `overallErrorMessage`)
//! and in chat transcripts, so they follow the configured [`Locale`].

use ac_protocol::Locale;

/// Substituted for an empty generation output in single-agent invocation.
pub fn fallback_response(locale: Locale) -> &'static str {
    match locale {
        Locale::Arabic => "عذراً، لم أتمكن من معالجة طلبك الآن. يرجى المحاولة مرة أخرى.",
        Locale::English => "Sorry, I couldn't process your request right now. Please try again.",
    }
}

/// Recorded when a comparison branch or pipeline step yields no output.
pub fn no_output(locale: Locale) -> &'static str {
    match locale {
        Locale::Arabic => "لم يتم استلام أي مخرجات من الوكيل.",
        Locale::English => "No output was received from the agent.",
    }
}

/// Recorded when a failure carries no message of its own.
pub fn unknown_error(locale: Locale) -> &'static str {
    match locale {
        Locale::Arabic => "حدث خطأ غير معروف أثناء معالجة طلب هذا الوكيل.",
        Locale::English => "An unknown error occurred while processing this agent's request.",
    }
}

/// Validation message for a comparison with no agents.
pub fn empty_comparison(locale: Locale) -> &'static str {
    match locale {
        Locale::Arabic => "يجب تحديد وكيل واحد على الأقل للمقارنة.",
        Locale::English => "At least one agent must be selected for comparison.",
    }
}

/// Validation message for a pipeline with no agents.
pub fn empty_pipeline(locale: Locale) -> &'static str {
    match locale {
        Locale::Arabic => "يجب أن يحتوي خط الأنابيب على وكيل واحد على الأقل.",
        Locale::English => "A pipeline must contain at least one agent.",
    }
}

/// The overall error of a pipeline that stopped at `agent_name`.
pub fn pipeline_failed(locale: Locale, agent_name: &str, error: &str) -> String {
    match locale {
        Locale::Arabic => format!("فشل خط الأنابيب عند الوكيل: {agent_name}. الخطأ: {error}"),
        Locale::English => format!("Pipeline failed at agent: {agent_name}. Error: {error}"),
    }
}

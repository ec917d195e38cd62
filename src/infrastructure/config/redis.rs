/// Redis hash holding the audit copy of every processed payment.
pub const PAYMENTS_CACHE_KEY: &str = "payments";

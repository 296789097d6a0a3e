// src/middleware/rate_limit.rs

use axum::http::HeaderMap;
use dashmap::DashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

// Limpeza preguiçosa: varre o mapa no máximo uma vez por minuto
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

// ---
// Rate limiter de janela fixa, em memória
// ---
// Proteção básica contra abuso na rota pública de consultas. É local
// ao processo: não sobrevive a restart e não é exato com múltiplas
// instâncias atrás de um balanceador. Suficiente porque o objetivo é
// dissuasão, não garantia de correção; um deploy horizontal exigiria
// um contador externo com TTL.
pub struct FixedWindowLimiter {
    entries: DashMap<String, Window>,
    max_requests: u32,
    window: Duration,
    last_cleanup: Mutex<Instant>,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    // Segundos até a janela reabrir (só interessa quando negado)
    pub retry_after_secs: u64,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window,
            last_cleanup: Mutex::new(Instant::now()),
        }
    }

    pub fn check(&self, identifier: &str) -> RateLimitDecision {
        self.check_at(identifier, Instant::now())
    }

    // Relógio injetável para os testes.
    fn check_at(&self, identifier: &str, now: Instant) -> RateLimitDecision {
        self.cleanup(now);

        let mut entry = self
            .entries
            .entry(identifier.to_string())
            .or_insert(Window { count: 0, reset_at: now + self.window });

        // Janela expirada: recomeça a contagem
        if now >= entry.reset_at {
            entry.count = 0;
            entry.reset_at = now + self.window;
        }

        if entry.count >= self.max_requests {
            let remaining_window = entry.reset_at.saturating_duration_since(now);
            let retry_after_secs = remaining_window.as_secs_f64().ceil().max(1.0) as u64;
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                retry_after_secs,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.max_requests - entry.count,
            retry_after_secs: 0,
        }
    }

    // Remove janelas já expiradas para o mapa não crescer sem limite.
    fn cleanup(&self, now: Instant) {
        let mut last = match self.last_cleanup.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if now.duration_since(*last) < CLEANUP_INTERVAL {
            return;
        }
        self.entries.retain(|_, window| window.reset_at > now);
        *last = now;
    }
}

/// Extrai o IP do cliente a partir dos cabeçalhos de proxy.
/// "unknown" agrupa clientes sem cabeçalho em um balde único.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return real_ip.to_string();
    }

    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permite_exatamente_o_maximo_na_janela() {
        let limiter = FixedWindowLimiter::new(5, Duration::from_secs(60));
        let base = Instant::now();

        for i in 0..5 {
            let decision = limiter.check_at("10.0.0.1", base);
            assert!(decision.allowed, "requisição {} deveria passar", i + 1);
        }

        let sexta = limiter.check_at("10.0.0.1", base);
        assert!(!sexta.allowed);
        assert!(sexta.retry_after_secs >= 1);
        assert!(sexta.retry_after_secs <= 60);
    }

    #[test]
    fn janela_expirada_reabre_a_contagem() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_secs(60));
        let base = Instant::now();

        assert!(limiter.check_at("ip", base).allowed);
        assert!(limiter.check_at("ip", base).allowed);
        assert!(!limiter.check_at("ip", base).allowed);

        let depois = base + Duration::from_secs(61);
        assert!(limiter.check_at("ip", depois).allowed);
    }

    #[test]
    fn identificadores_diferentes_nao_se_misturam() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let base = Instant::now();

        assert!(limiter.check_at("a", base).allowed);
        assert!(limiter.check_at("b", base).allowed);
        assert!(!limiter.check_at("a", base).allowed);
    }

    #[test]
    fn remaining_decresce_ate_zero() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(60));
        let base = Instant::now();

        assert_eq!(limiter.check_at("ip", base).remaining, 2);
        assert_eq!(limiter.check_at("ip", base).remaining, 1);
        assert_eq!(limiter.check_at("ip", base).remaining, 0);
    }

    #[test]
    fn extrai_ip_do_x_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn sem_cabecalhos_cai_para_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }
}

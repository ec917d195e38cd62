pub mod in_memory_circuit_breaker;
pub mod in_memory_health_monitor;

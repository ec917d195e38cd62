pub mod audit_worker;

/*
 * Responsibility
 * - router 全体にかける middleware (transport / browser 向け)
 * - scm-api / identity 共通。認可 (Token Gate) は token_gate 側
 */
pub mod cors;
pub mod http;
pub mod security_headers;

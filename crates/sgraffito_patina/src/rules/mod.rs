//! Lint rules for Pug templates in Vue.js SFC files.

pub mod vue;

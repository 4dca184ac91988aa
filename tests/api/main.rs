mod config;
mod plan;
mod route;
mod scenarios;

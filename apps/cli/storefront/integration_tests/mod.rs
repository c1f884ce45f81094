mod bootstrap;
mod cli;
mod terminal;

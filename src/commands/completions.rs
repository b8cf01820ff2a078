use clap::Args;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

#[derive(Args)]
pub struct CompletionsCommand {
    /// The shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

impl CompletionsCommand {
    /// Print completions for the CLI type `C` to stdout
    pub fn generate_completions<C: clap::CommandFactory>(&self) {
        self.write_completions::<C>(&mut io::stdout());
    }

    pub fn write_completions<C: clap::CommandFactory>(&self, out: &mut dyn Write) {
        let mut cmd = C::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, out);
    }
}

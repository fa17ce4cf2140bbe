/// Global commands delivered by the host to the background context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    PasteLastItem,
}

impl HostCommand {
    pub const PASTE_LAST_ITEM: &'static str = "paste-last-item";

    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::PasteLastItem => Self::PASTE_LAST_ITEM,
        }
    }
}

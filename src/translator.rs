pub const UNKNOWN_AGENT: &str = "unknown";

const MAP_ID_TO_NAME: &[(&str, &str)] = &[
    ("/Game/Maps/Ascent/Ascent", "Ascent"),
    ("/Game/Maps/Bind/Bind", "Bind"),
    ("/Game/Maps/Bonsai/Bonsai", "Split"),
    ("/Game/Maps/Canyon/Canyon", "Fracture"),
    ("/Game/Maps/Duality/Duality", "Bind"),
    ("/Game/Maps/Foxtrot/Foxtrot", "Breeze"),
    ("/Game/Maps/Haven/Haven", "Haven"),
    ("/Game/Maps/Icebox/Icebox", "Icebox"),
    ("/Game/Maps/Jam/Jam", "Lotus"),
    ("/Game/Maps/Juliett/Juliett", "Sunset"),
    ("/Game/Maps/Pitt/Pitt", "Pearl"),
    ("/Game/Maps/Port/Port", "Icebox"),
    ("/Game/Maps/Triad/Triad", "Haven"),
    ("/Game/Maps/Rook/Rook", "Bind"),
];

const AGENT_ID_TO_NAME: &[(&str, &str)] = &[
    ("add6443a-41bd-e414-f6ad-e58d267f4e95", "jett"),
    ("320b2a48-4d9b-a075-30f1-1f93a9b638fa", "sova"),
    ("dade69b4-4f5a-8528-247b-219e5a1facd6", "fade"),
    ("117ed9e3-49f3-6512-3ccf-0cada7e3823b", "cypher"),
    ("707eab51-4836-f488-046a-cda6bf494859", "viper"),
    ("a3bfb853-43b2-7238-a4f1-ad90e9e46bcc", "reyna"),
    ("1e58de9c-4950-5125-93e9-a0aee9f98746", "killjoy"),
    ("bb2a4828-46eb-8cd1-e765-15848195d751", "neon"),
    ("41fb69c1-4189-7b37-f117-bcaf1e96f1bf", "astra"),
    ("1dbf2edd-4729-0984-3115-daa5eed44993", "clove"),
    ("efba5359-4016-a1e5-7626-b1ae76895940", "vyse"),
    ("7f94d92c-4234-0a36-9646-3a87eb8b5c89", "yoru"),
    ("8e253930-4c05-31dd-1b6c-968525494517", "omen"),
    ("5f8d3a7f-467b-97f3-062c-13acf203c006", "breach"),
    ("6f2a04ca-43e0-be17-7f36-b3908627744d", "skye"),
    ("f94c3b30-42be-e959-889c-5aa313dba261", "raze"),
    ("9f0d8ba9-4140-b941-57d3-a7ad57c6b417", "brimstone"),
    ("22697a3d-45bf-8dd7-4fec-84a9e28c69d7", "chamber"),
    ("0e38b510-41a8-5780-5e8f-568b2a4f2d6c", "iso"),
    ("569fdd95-4d10-43ab-ca70-79becc718b46", "sage"),
    ("601dbbe7-43ce-be57-2a40-4abd24953621", "kayo"),
    ("cc8b64c8-4b25-4ff9-6e7f-37b4da43d235", "deadlock"),
    ("df1cb487-4902-002e-5c17-d28e83e78588", "waylay"),
    ("e370fa57-4757-3604-3648-499e1f642d3f", "gekko"),
    ("95b78ed7-4637-86d9-7e41-71ba8c293152", "harbor"),
    ("b444168c-4e35-8076-db47-ef9bf368f384", "tejo"),
    ("eb93336a-449b-9c1b-0a54-a891f7921d69", "phoenix"),
    ("92eeef5d-43b5-1d4a-8d03-b3927a09034b", "veto"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(id, _)| *id == key)
        .map(|(_, name)| *name)
}

/// Display name for a map asset path; unknown paths are returned unchanged.
pub fn map_name(map_id: &str) -> String {
    lookup(MAP_ID_TO_NAME, map_id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| map_id.to_string())
}

/// Lower-case agent name for a character UUID, or [`UNKNOWN_AGENT`].
pub fn agent_name(character_id: &str) -> &'static str {
    lookup(AGENT_ID_TO_NAME, character_id).unwrap_or(UNKNOWN_AGENT)
}

use crate::{
    classes::TopLevel,
    config::Config,
    model::{kind, FieldSpec, PropertyDef, ReferencedDef, SbolObject, SbolType},
    vocab, Result,
};

sbol_class!(
    /// A named group of top-level objects.
    Collection => Collection
);

impl Collection {
    pub const MEMBERS: ReferencedDef<TopLevel> = ReferencedDef::many(vocab::MEMBER);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[Self::MEMBERS.field()];

    /// # Errors
    ///
    /// As [`SbolObject::new`].
    pub fn new(config: &Config, id: &str) -> Result<SbolObject> {
        SbolObject::new(config, Self::CLASS, id)
    }
}

sbol_class!(
    /// A pointer to an external file describing a design.
    Attachment => Attachment
);

impl Attachment {
    pub const SOURCE: PropertyDef<kind::Uri> = PropertyDef::required(vocab::SOURCE);
    pub const FORMAT: PropertyDef<kind::Uri> = PropertyDef::optional(vocab::FORMAT);
    pub const SIZE: PropertyDef<kind::Int> = PropertyDef::optional(vocab::SIZE);
    pub const HASH: PropertyDef<kind::Text> = PropertyDef::optional(vocab::HASH);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::SOURCE.field(),
        Self::FORMAT.field(),
        Self::SIZE.field(),
        Self::HASH.field(),
    ];

    /// # Errors
    ///
    /// As [`SbolObject::new`], or `InvalidFormat` for a malformed source.
    pub fn new(config: &Config, id: &str, source: &str) -> Result<SbolObject> {
        let mut attachment = SbolObject::new(config, Self::CLASS, id)?;
        attachment.property(Self::SOURCE).set(source)?;
        Ok(attachment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classes::identified, model::Identified, Document, Error};

    #[test]
    fn collection_members_resolve_to_any_top_level() {
        let config = Config::default();
        let mut document = Document::new(config.clone());
        let attachment =
            Attachment::new(&config, "datasheet", "http://parts.igem.org/B0032.pdf").expect("file");
        let attachment_uri = attachment.identity().to_string();
        document.add(attachment).expect("registered");

        let mut library = Collection::new(&config, "library").expect("collection");
        library
            .referenced(Collection::MEMBERS)
            .add(&attachment_uri)
            .expect("member");
        let members = library
            .references(Collection::MEMBERS)
            .resolve_all(&document)
            .expect("members");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].class(), Attachment::CLASS);
    }

    #[test]
    fn top_levels_accept_attachments() {
        let config = Config::default();
        let mut library = Collection::new(&config, "library").expect("collection");
        library
            .referenced(identified::ATTACHMENTS)
            .add("http://examples.com/datasheet/1.0.0")
            .expect("attachment reference");
        let err = library
            .property(Attachment::SIZE)
            .set(5)
            .expect_err("size is not declared on Collection");
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(library.property_values(Attachment::SIZE.uri).is_empty());

        let mut datasheet =
            Attachment::new(&config, "datasheet", "http://parts.igem.org/B0032.pdf").expect("file");
        let err = datasheet
            .property(Attachment::SIZE)
            .set_str("large")
            .expect_err("not an integer");
        assert!(matches!(err, Error::InvalidFormat { .. }));
        datasheet.property(Attachment::SIZE).set(5).expect("size");
    }
}

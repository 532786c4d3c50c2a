use crate::modules::resources::core::test_type::TestType;

pub struct TestTypeBuilder {
    inner: TestType,
}

impl Default for TestTypeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTypeBuilder {
    pub fn new() -> Self {
        Self {
            inner: TestType {
                text: "foo".to_string(),
                num: 5,
            },
        }
    }

    pub fn text(mut self, v: impl Into<String>) -> Self {
        self.inner.text = v.into();
        self
    }

    pub fn num(mut self, v: i64) -> Self {
        self.inner.num = v;
        self
    }

    pub fn build(self) -> TestType {
        self.inner
    }
}

#[cfg(test)]
mod test_type_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new() {
        let built = TestTypeBuilder::default().build();
        assert_eq!(built.text, "foo");
        assert_eq!(built.num, 5);
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = TestTypeBuilder::new().text("bar").num(9).build();
        assert_eq!(custom.text, "bar");
        assert_eq!(custom.num, 9);
    }
}

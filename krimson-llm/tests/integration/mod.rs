mod test_gemini_provider;
